use seq_view::viable::{Callable, FromArgs, callable_info, construct};
use seq_view::{is_callable, is_viable};

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
    z: i32,
}

impl FromArgs<()> for Point {
    fn from_args(_: ()) -> Self {
        Point { x: 640, y: 480, z: 32 }
    }
}

impl FromArgs<(i32, i32)> for Point {
    fn from_args((x, y): (i32, i32)) -> Self {
        Point { x, y, z: 32 }
    }
}

impl FromArgs<(i32, i32, i32)> for Point {
    fn from_args((x, y, z): (i32, i32, i32)) -> Self {
        Point { x, y, z }
    }
}

impl Point {
    fn scaled(&self, k: i32) -> i32 {
        (self.x + self.y + self.z) * k
    }
}

fn add(a: i32, b: i32) -> i32 {
    a + b
}

#[test]
fn every_declared_constructor_is_viable() {
    assert!(is_viable!(Point: ()));
    assert!(is_viable!(Point: (i32, i32)));
    assert!(is_viable!(Point: (i32, i32, i32)));
}

#[test]
fn mismatched_argument_lists_are_not_viable() {
    assert!(!is_viable!(Point: (i32,)));
    assert!(!is_viable!(Point: (i32, i32, i32, i32)));
    assert!(!is_viable!(Point: (i32, &str)));
    assert!(!is_viable!(Point: (i64, i64)));
}

#[test]
fn construct_uses_the_matching_constructor() {
    assert_eq!(construct::<Point, _>(()), Point { x: 640, y: 480, z: 32 });
    assert_eq!(construct::<Point, _>((1, 2)), Point { x: 1, y: 2, z: 32 });
    assert_eq!(construct::<Point, _>((1, 2, 3)), Point { x: 1, y: 2, z: 3 });
}

#[test]
fn callable_checks_cover_functions_methods_and_closures() {
    assert!(is_callable!(add => (i32, i32)));
    assert!(!is_callable!(add => (i32)));
    assert!(!is_callable!(add => (&str, i32)));

    assert!(is_callable!(Point::scaled => (&Point, i32)));
    assert!(!is_callable!(Point::scaled => (i32)));

    let offset = 10;
    let shift = move |x: i32| x + offset;
    assert!(is_callable!(shift => (i32)));
    assert!(!is_callable!(shift => ()));
}

#[test]
fn callable_info_reports_signature_and_invokes() {
    let pwr2 = |x: &i32| x * x;
    let info = callable_info(&pwr2);

    assert_eq!(info.arity::<(&i32,)>(), 1);
    assert_eq!(info.result_type_name::<(&i32,)>(), "i32");
    assert_eq!(info.invoke((&7,)), 49);
    assert!(info.type_name().contains("closure"));

    assert_eq!(<fn(i32, i32) -> i32 as Callable<(i32, i32)>>::ARITY, 2);
    assert_eq!(callable_info(&add).invoke((2, 3)), 5);
}
