//! Visitor: shapes dispatch to the visitor method matching their variant.

use std::f64::consts::PI;
use std::io::Write;

use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub side: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub side1: f64,
    pub side2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle(Circle { radius })
    }

    pub fn square(side: f64) -> Self {
        Shape::Square(Square { side })
    }

    pub fn rectangle(side1: f64, side2: f64) -> Self {
        Shape::Rectangle(Rectangle { side1, side2 })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Square(_) => "square",
            Shape::Rectangle(_) => "rectangle",
        }
    }

    pub fn accept<V: ShapeVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Shape::Circle(circle) => visitor.visit_circle(circle),
            Shape::Square(square) => visitor.visit_square(square),
            Shape::Rectangle(rectangle) => visitor.visit_rectangle(rectangle),
        }
    }
}

pub trait ShapeVisitor {
    fn visit_circle(&mut self, circle: &Circle);
    fn visit_square(&mut self, square: &Square);
    fn visit_rectangle(&mut self, rectangle: &Rectangle);
}

/// Holds the area of the last shape visited.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AreaVisitor {
    pub area: f64,
    pub last_shape: Option<&'static str>,
}

impl ShapeVisitor for AreaVisitor {
    fn visit_circle(&mut self, circle: &Circle) {
        self.area = PI * circle.radius * circle.radius;
        self.last_shape = Some("circle");
        debug!(area = self.area, "calculated area for circle");
    }

    fn visit_square(&mut self, square: &Square) {
        self.area = square.side * square.side;
        self.last_shape = Some("square");
        debug!(area = self.area, "calculated area for square");
    }

    fn visit_rectangle(&mut self, rectangle: &Rectangle) {
        self.area = rectangle.side1 * rectangle.side2;
        self.last_shape = Some("rectangle");
        debug!(area = self.area, "calculated area for rectangle");
    }
}

/// Holds the perimeter of the last shape visited.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PerimeterVisitor {
    pub perimeter: f64,
    pub last_shape: Option<&'static str>,
}

impl ShapeVisitor for PerimeterVisitor {
    fn visit_circle(&mut self, circle: &Circle) {
        self.perimeter = 2.0 * PI * circle.radius;
        self.last_shape = Some("circle");
        debug!(perimeter = self.perimeter, "calculated perimeter for circle");
    }

    fn visit_square(&mut self, square: &Square) {
        self.perimeter = 4.0 * square.side;
        self.last_shape = Some("square");
        debug!(perimeter = self.perimeter, "calculated perimeter for square");
    }

    fn visit_rectangle(&mut self, rectangle: &Rectangle) {
        self.perimeter = 2.0 * (rectangle.side1 + rectangle.side2);
        self.last_shape = Some("rectangle");
        debug!(perimeter = self.perimeter, "calculated perimeter for rectangle");
    }
}

pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    let shapes = [
        Shape::circle(5.0),
        Shape::square(10.0),
        Shape::rectangle(5.0, 6.0),
    ];

    let mut area = AreaVisitor::default();
    for shape in &shapes {
        shape.accept(&mut area);
        writeln!(out, "Area of {}: {:.4}", shape.kind(), area.area)?;
    }

    writeln!(out)?;
    let mut perimeter = PerimeterVisitor::default();
    for shape in &shapes {
        shape.accept(&mut perimeter);
        writeln!(out, "Perimeter of {}: {:.4}", shape.kind(), perimeter.perimeter)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_areas() {
        let mut area = AreaVisitor::default();
        Shape::circle(5.0).accept(&mut area);
        assert!((area.area - PI * 25.0).abs() < EPS);
        assert!((area.area - 78.5398).abs() < 1e-4);

        Shape::square(10.0).accept(&mut area);
        assert_eq!(area.area, 100.0);

        Shape::rectangle(5.0, 6.0).accept(&mut area);
        assert_eq!(area.area, 30.0);
    }

    #[test]
    fn test_perimeters() {
        let mut perimeter = PerimeterVisitor::default();
        Shape::circle(5.0).accept(&mut perimeter);
        assert!((perimeter.perimeter - 10.0 * PI).abs() < EPS);

        Shape::square(10.0).accept(&mut perimeter);
        assert_eq!(perimeter.perimeter, 40.0);

        Shape::rectangle(5.0, 6.0).accept(&mut perimeter);
        assert_eq!(perimeter.perimeter, 22.0);
    }

    #[test]
    fn test_result_is_overwritten_not_accumulated() {
        let mut area = AreaVisitor::default();
        Shape::square(10.0).accept(&mut area);
        Shape::square(2.0).accept(&mut area);
        assert_eq!(area.area, 4.0);
        assert_eq!(area.last_shape, Some("square"));
    }

    #[derive(Default)]
    struct Tally(Vec<&'static str>);

    impl ShapeVisitor for Tally {
        fn visit_circle(&mut self, _: &Circle) {
            self.0.push("circle");
        }

        fn visit_square(&mut self, _: &Square) {
            self.0.push("square");
        }

        fn visit_rectangle(&mut self, _: &Rectangle) {
            self.0.push("rectangle");
        }
    }

    #[test]
    fn test_each_variant_hits_its_own_method() {
        let mut tally = Tally::default();
        {
            let visitor: &mut dyn ShapeVisitor = &mut tally;
            for shape in [Shape::rectangle(1.0, 2.0), Shape::circle(1.0), Shape::square(3.0)] {
                shape.accept(&mut *visitor);
            }
        }
        assert_eq!(tally.0, vec!["rectangle", "circle", "square"]);
    }

    #[test]
    fn test_demo_transcript() {
        let mut out = Vec::new();
        demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Area of circle: 78.5398"));
        assert!(text.contains("Area of square: 100.0000"));
        assert!(text.contains("Perimeter of rectangle: 22.0000"));
    }
}
