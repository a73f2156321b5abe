/// 2D drawing surface and its terminal-cell implementation.
///
/// `Surface` is the drawing context entities render into: canvas-style
/// primitives plus a save/restore/translate/scale transform stack.
///
/// `Canvas` rasterizes those primitives onto a grid of terminal cells.
/// Shapes are sampled at cell centres: a cell is painted when its centre,
/// mapped back through the current transform, falls inside the shape.
/// Strokes keep the cell background and draw box glyphs in the stroke
/// colour, so outlines stay visible even on shapes a few cells wide.

use crossterm::style::Color;

pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Angles in radians, clockwise from +x (y grows down).
    fn fill_arc(&mut self, cx: f32, cy: f32, r: f32, start: f32, end: f32, color: Color);
    fn stroke_arc(&mut self, cx: f32, cy: f32, r: f32, start: f32, end: f32, color: Color);
    fn fill_path(&mut self, points: &[(f32, f32)], color: Color);
    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: Color);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, sx: f32, sy: f32);
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// Sky colour; also the terminal clear colour so gaps between rows match.
    pub const BASE_BG: Color = Color::Rgb { r: 92, g: 148, b: 252 };

    pub const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    pub const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

/// Affine transform: screen = local * scale + offset.
#[derive(Clone, Copy, PartialEq, Debug)]
struct Transform {
    tx: f32,
    ty: f32,
    sx: f32,
    sy: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform { tx: 0.0, ty: 0.0, sx: 1.0, sy: 1.0 };

    #[inline]
    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.sx + self.tx, y * self.sy + self.ty)
    }

    #[inline]
    fn invert(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.tx) / self.sx, (y - self.ty) / self.sy)
    }
}

/// A grid of cells plus the transform stack. Screen units are cells.
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Canvas {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
            transform: Transform::IDENTITY,
            stack: Vec::with_capacity(4),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    pub fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            Some(&mut self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Cell index range covering the local-space box, clamped to the grid.
    fn cell_span(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> (usize, usize, usize, usize) {
        let (ax, ay) = self.transform.apply(x0, y0);
        let (bx, by) = self.transform.apply(x1, y1);
        let clamp = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        (
            clamp(ax.min(bx).floor(), self.width),
            clamp(ay.min(by).floor(), self.height),
            clamp(ax.max(bx).ceil(), self.width),
            clamp(ay.max(by).ceil(), self.height),
        )
    }

    /// Visit every cell whose centre maps inside `inside(local_x, local_y)`.
    fn paint<F, P>(&mut self, bbox: (f32, f32, f32, f32), inside: F, mut paint: P)
    where
        F: Fn(f32, f32) -> bool,
        P: FnMut(&mut Cell),
    {
        let (cx0, cy0, cx1, cy1) = self.cell_span(bbox.0, bbox.1, bbox.2, bbox.3);
        let t = self.transform;
        for cy in cy0..cy1 {
            for cx in cx0..cx1 {
                let (lx, ly) = t.invert(cx as f32 + 0.5, cy as f32 + 0.5);
                if inside(lx, ly) {
                    if let Some(cell) = self.cell_mut(cx, cy) {
                        paint(cell);
                    }
                }
            }
        }
    }
}

/// Is `angle` within the clockwise sweep from `start` to `end`?
fn angle_in_sweep(angle: f32, start: f32, end: f32) -> bool {
    use std::f32::consts::TAU;
    let sweep = end - start;
    if sweep >= TAU { return true; }
    (angle - start).rem_euclid(TAU) <= sweep.rem_euclid(TAU)
}

/// Even-odd point-in-polygon test.
fn point_in_polygon(x: f32, y: f32, points: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.paint(
            (x, y, x + w, y + h),
            |lx, ly| lx >= x && lx < x + w && ly >= y && ly < y + h,
            |cell| *cell = Cell { ch: ' ', fg: color, bg: color },
        );
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (cx0, cy0, cx1, cy1) = self.cell_span(x, y, x + w, y + h);
        if cx0 >= cx1 || cy0 >= cy1 { return; }
        let (last_x, last_y) = (cx1 - 1, cy1 - 1);
        for cy in cy0..cy1 {
            for cx in cx0..cx1 {
                let top = cy == cy0;
                let bottom = cy == last_y;
                let left = cx == cx0;
                let right = cx == last_x;
                let ch = match (top || bottom, left || right) {
                    (false, false) => continue,
                    _ if cx0 == last_x && cy0 == last_y => '□',
                    _ if cx0 == last_x => '│',
                    _ if cy0 == last_y => '─',
                    (true, true) => match (top, left) {
                        (true, true) => '┌',
                        (true, false) => '┐',
                        (false, true) => '└',
                        (false, false) => '┘',
                    },
                    (true, false) => '─',
                    (false, true) => '│',
                };
                if let Some(cell) = self.cell_mut(cx, cy) {
                    cell.ch = ch;
                    cell.fg = color;
                }
            }
        }
    }

    fn fill_arc(&mut self, cx: f32, cy: f32, r: f32, start: f32, end: f32, color: Color) {
        self.paint(
            (cx - r, cy - r, cx + r, cy + r),
            |lx, ly| {
                let (dx, dy) = (lx - cx, ly - cy);
                dx * dx + dy * dy <= r * r && angle_in_sweep(dy.atan2(dx), start, end)
            },
            |cell| *cell = Cell { ch: ' ', fg: color, bg: color },
        );
    }

    fn stroke_arc(&mut self, cx: f32, cy: f32, r: f32, start: f32, end: f32, color: Color) {
        // Ring thickness: one cell in the thinner screen direction.
        let t = self.transform;
        let band = 0.5 / t.sx.abs().max(t.sy.abs());
        self.paint(
            (cx - r - band, cy - r - band, cx + r + band, cy + r + band),
            |lx, ly| {
                let (dx, dy) = (lx - cx, ly - cy);
                ((dx * dx + dy * dy).sqrt() - r).abs() <= band
                    && angle_in_sweep(dy.atan2(dx), start, end)
            },
            |cell| {
                cell.ch = '•';
                cell.fg = color;
            },
        );
    }

    fn fill_path(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 { return; }
        let (mut x0, mut y0) = points[0];
        let (mut x1, mut y1) = points[0];
        for &(px, py) in points {
            x0 = x0.min(px);
            y0 = y0.min(py);
            x1 = x1.max(px);
            y1 = y1.max(py);
        }
        self.paint(
            (x0, y0, x1, y1),
            |lx, ly| point_in_polygon(lx, ly, points),
            |cell| *cell = Cell { ch: ' ', fg: color, bg: color },
        );
    }

    /// Text is not scaled: one char per cell starting at the mapped origin.
    /// Glyphs keep the background already painted underneath.
    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let (sx, sy) = self.transform.apply(x, y);
        if sy < 0.0 || sx.is_nan() { return; }
        let row = sy.floor() as usize;
        let mut col = sx.floor() as i64;
        for ch in text.chars() {
            if col >= self.width as i64 { break; }
            if col >= 0 {
                if let Some(cell) = self.cell_mut(col as usize, row) {
                    cell.ch = ch;
                    cell.fg = color;
                }
            }
            col += 1;
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.tx += dx * self.transform.sx;
        self.transform.ty += dy * self.transform.sy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transform.sx *= sx;
        self.transform.sy *= sy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const RED: Color = Color::Red;

    fn painted(c: &Canvas, color: Color) -> Vec<(usize, usize)> {
        let mut out = vec![];
        for y in 0..c.height() {
            for x in 0..c.width() {
                if c.get(x, y).bg == color { out.push((x, y)); }
            }
        }
        out
    }

    #[test]
    fn fill_rect_in_cell_units() {
        let mut c = Canvas::new(10, 5);
        c.fill_rect(2.0, 1.0, 3.0, 2.0, RED);
        assert_eq!(painted(&c, RED), vec![(2, 1), (3, 1), (4, 1), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn fill_rect_through_world_scale() {
        // 10 × 25 world units per cell.
        let mut c = Canvas::new(80, 16);
        c.scale(0.1, 0.04);
        c.fill_rect(200.0, 250.0, 40.0, 50.0, RED);
        assert_eq!(painted(&c, RED), vec![(20, 10), (21, 10), (22, 10), (23, 10), (20, 11), (21, 11), (22, 11), (23, 11)]);
    }

    #[test]
    fn off_grid_shapes_are_clipped() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(-10.0, -10.0, 12.0, 12.0, RED);
        assert_eq!(painted(&c, RED), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        c.fill_rect(100.0, 100.0, 5.0, 5.0, Color::Green);
        assert!(painted(&c, Color::Green).is_empty());
    }

    #[test]
    fn stroke_rect_draws_box_glyphs_and_keeps_fill() {
        let mut c = Canvas::new(6, 3);
        c.fill_rect(0.0, 0.0, 4.0, 3.0, RED);
        c.stroke_rect(0.0, 0.0, 4.0, 3.0, Color::Black);
        assert_eq!(c.get(0, 0).ch, '┌');
        assert_eq!(c.get(3, 0).ch, '┐');
        assert_eq!(c.get(0, 2).ch, '└');
        assert_eq!(c.get(3, 2).ch, '┘');
        assert_eq!(c.get(1, 0).ch, '─');
        assert_eq!(c.get(0, 1).ch, '│');
        assert_eq!(c.get(1, 1).ch, ' ');
        assert_eq!(c.get(0, 0).bg, RED);
        assert_eq!(c.get(0, 0).fg, Color::Black);
    }

    #[test]
    fn stroke_of_one_column_is_vertical_bar() {
        let mut c = Canvas::new(3, 3);
        c.stroke_rect(1.0, 0.0, 1.0, 3.0, Color::Black);
        assert_eq!(c.get(1, 0).ch, '│');
        assert_eq!(c.get(1, 2).ch, '│');
    }

    #[test]
    fn full_circle_and_upper_half() {
        let mut c = Canvas::new(9, 9);
        c.fill_arc(4.5, 4.5, 3.0, 0.0, 2.0 * PI, RED);
        let full = painted(&c, RED).len();

        let mut h = Canvas::new(9, 9);
        h.fill_arc(4.5, 4.5, 3.0, PI, 2.0 * PI, RED);
        let half = painted(&h, RED);
        assert!(half.len() < full);
        // Upper half only: nothing below the centre row.
        assert!(half.iter().all(|&(_, y)| y <= 4));
        assert!(h.get(4, 2).bg == RED);
    }

    #[test]
    fn stroke_arc_draws_ring_only() {
        let mut c = Canvas::new(9, 9);
        c.stroke_arc(4.5, 4.5, 3.0, 0.0, 2.0 * PI, RED);
        assert_eq!(c.get(7, 4).ch, '•');
        assert_eq!(c.get(7, 4).fg, RED);
        assert_eq!(c.get(7, 4).bg, Cell::BASE_BG);
        assert_eq!(c.get(4, 1).ch, '•');
        assert_eq!(c.get(4, 4), Cell::BLANK);

        let mut h = Canvas::new(9, 9);
        h.stroke_arc(4.5, 4.5, 3.0, PI, 2.0 * PI, RED);
        assert_eq!(h.get(4, 1).ch, '•');
        assert_eq!(h.get(4, 7), Cell::BLANK);
    }

    #[test]
    fn triangle_path() {
        let mut c = Canvas::new(10, 10);
        c.fill_path(&[(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)], RED);
        assert_eq!(c.get(1, 1).bg, RED);
        assert_ne!(c.get(7, 7).bg, RED);
    }

    #[test]
    fn text_keeps_background() {
        let mut c = Canvas::new(10, 2);
        c.fill_rect(0.0, 0.0, 10.0, 1.0, RED);
        c.fill_text(2.0, 0.0, "HI", Color::White);
        assert_eq!(c.get(2, 0).ch, 'H');
        assert_eq!(c.get(3, 0).ch, 'I');
        assert_eq!(c.get(2, 0).bg, RED);
    }

    #[test]
    fn text_clipped_at_left_edge() {
        let mut c = Canvas::new(5, 1);
        c.fill_text(-2.0, 0.0, "ABCD", Color::White);
        assert_eq!(c.get(0, 0).ch, 'C');
        assert_eq!(c.get(1, 0).ch, 'D');
    }

    #[test]
    fn save_restore_translate() {
        let mut c = Canvas::new(10, 10);
        c.save();
        c.translate(5.0, 5.0);
        c.fill_rect(0.0, 0.0, 1.0, 1.0, RED);
        c.restore();
        c.fill_rect(0.0, 0.0, 1.0, 1.0, Color::Green);
        assert_eq!(c.get(5, 5).bg, RED);
        assert_eq!(c.get(0, 0).bg, Color::Green);
    }

    #[test]
    fn translate_is_in_local_units() {
        let mut c = Canvas::new(10, 10);
        c.scale(0.5, 0.5);
        c.translate(4.0, 0.0); // 4 local = 2 cells
        c.fill_rect(0.0, 0.0, 2.0, 2.0, RED);
        assert_eq!(painted(&c, RED), vec![(2, 0)]);
    }

    #[test]
    fn clear_resets_cells() {
        let mut c = Canvas::new(3, 3);
        c.fill_rect(0.0, 0.0, 3.0, 3.0, RED);
        c.clear();
        assert!(painted(&c, RED).is_empty());
        assert_eq!(c.get(1, 1), Cell::BLANK);
    }
}
