use super::*;

#[test]
fn start_is_one_one() {
    assert_eq!(Position::START, Position::new(1, 1));
    assert_eq!(Position::default(), Position::START);
}

#[test]
fn advanced_by_moves_column_only() {
    let pos = Position::new(3, 4).advanced_by(5);
    assert_eq!(pos, Position::new(3, 9));
}

#[test]
fn next_line_resets_column() {
    let pos = Position::new(3, 17).next_line();
    assert_eq!(pos, Position::new(4, 1));
}

#[test]
fn ordering_follows_scan_order() {
    assert!(Position::new(1, 9) < Position::new(2, 1));
    assert!(Position::new(2, 1) < Position::new(2, 2));
}

#[test]
fn display_matches_diagnostic_format() {
    assert_eq!(Position::new(7, 12).to_string(), "line 7:column 12");
}
