/// A drawable pixel target with a current draw color.
///
/// This is the only capability the renderers need from the host: immediate
/// point, line and rectangle primitives in the current color. Presenting
/// the result is left to whoever owns the surface.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_draw_color(&mut self, color: u32);

    /// Fills the whole surface with the current draw color.
    fn clear(&mut self);

    /// Plots one pixel; coordinates outside the surface are ignored.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Draws a line including both endpoints.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for (x, y) in BresenhamLine::new(x0, y0, x1, y1) {
            self.draw_point(x, y);
        }
    }

    /// Fills the half-open rectangle `[x1, x2) x [y1, y2)`.
    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        for y in y1..y2 {
            if x2 > x1 {
                self.draw_line(x1, y, x2 - 1, y);
            }
        }
    }
}

/// Pixels of a line from `(x0, y0)` to `(x1, y1)`, both ends included.
///
/// Integer-only Bresenham: the error term tracks the distance between the
/// ideal line and the current pixel, stepping diagonally when it exceeds
/// half a pixel on either axis.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    step_x: i32,
    step_y: i32,
    err: i32,
    done: bool,
}

impl BresenhamLine {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            step_x: if x0 < x1 { 1 } else { -1 },
            step_y: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.step_x;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.step_y;
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_includes_both_endpoints() {
        let points: Vec<_> = BresenhamLine::new(0, 0, 3, 0).collect();
        assert_eq!(points, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);

        let points: Vec<_> = BresenhamLine::new(2, 2, 2, 2).collect();
        assert_eq!(points, vec![(2, 2)]);
    }

    #[test]
    fn diagonal_and_reversed_lines() {
        let points: Vec<_> = BresenhamLine::new(3, 3, 0, 0).collect();
        assert_eq!(points, vec![(3, 3), (2, 2), (1, 1), (0, 0)]);

        let steep: Vec<_> = BresenhamLine::new(0, 0, 1, 4).collect();
        assert_eq!(steep.len(), 5);
        assert_eq!(steep.first(), Some(&(0, 0)));
        assert_eq!(steep.last(), Some(&(1, 4)));
    }
}
