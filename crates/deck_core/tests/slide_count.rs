use deck_core::{clamp_slide_count, slide_count_from_input, SLIDE_COUNT_DEFAULT};

#[test]
fn clamp_pins_out_of_range_values() {
    assert_eq!(clamp_slide_count(1), 3);
    assert_eq!(clamp_slide_count(3), 3);
    assert_eq!(clamp_slide_count(12), 12);
    assert_eq!(clamp_slide_count(20), 20);
    assert_eq!(clamp_slide_count(25), 20);
    assert_eq!(clamp_slide_count(-4), 3);
}

#[test]
fn non_numeric_input_falls_back_to_default() {
    assert_eq!(slide_count_from_input("not a number"), SLIDE_COUNT_DEFAULT);
    assert_eq!(slide_count_from_input(""), SLIDE_COUNT_DEFAULT);
    assert_eq!(slide_count_from_input("   "), SLIDE_COUNT_DEFAULT);
    assert_eq!(slide_count_from_input("NaN"), SLIDE_COUNT_DEFAULT);
}

#[test]
fn numeric_input_is_parsed_and_clamped() {
    assert_eq!(slide_count_from_input("7"), 7);
    assert_eq!(slide_count_from_input(" 18 "), 18);
    assert_eq!(slide_count_from_input("100"), 20);
    assert_eq!(slide_count_from_input("0"), 3);
}
