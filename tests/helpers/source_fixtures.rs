//! Common source fixtures for tests.

pub const SHADOWING: &str = r#"
package app;

class Counter {
    int x;

    void bump(long x) {
        int x = 1;
        int seen = x;
    }
}
"#;

pub const NO_SUPERTYPE: &str = "package app; class Plain { }";

pub const GENERIC_BOUNDS: &str = r#"
package app;

class Sorted<T extends Comparable<T>, U> {
    T first;
    U other;
}
"#;

pub const UNKNOWN_SUPERTYPE: &str = r#"
package app;

class Broken extends Missing implements Runnable, AlsoMissing {
    public void run() { }
}
"#;

/// Two same-arity overloads whose parameter types are unrelated.
pub const OVERLOAD_TIE: &str = r#"
package app;

interface Walker { }
interface Swimmer { }
class Duck implements Walker, Swimmer { }

class Zoo {
    void visit(Walker w) { }
    void visit(Swimmer s) { }

    void run(Duck d) {
        visit(d);
    }
}
"#;

pub const SHAPES: &str = r#"
package shapes;

import java.util.List;
import java.util.ArrayList;

public abstract class Shape implements Comparable<Shape> {
    protected String name;

    public abstract double area();

    public int compareTo(Shape other) {
        return 0;
    }
}

class Circle extends Shape {
    double radius;

    Circle(double radius) {
        this.radius = radius;
    }

    public double area() {
        return Math.PI * radius * radius;
    }
}

class Drawing {
    List<Shape> shapes = new ArrayList<Shape>();

    double total() {
        double sum = 0;
        for (Shape s : shapes) {
            sum += s.area();
        }
        Shape biggest = shapes.get(0);
        int count = shapes.size();
        return sum;
    }
}
"#;
