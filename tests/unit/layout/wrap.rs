use super::*;

fn mono() -> FixedAdvance {
    FixedAdvance { advance_px: 10.0 }
}

#[test]
fn explicit_breaks_are_never_merged() {
    let lines = wrap_caption(&mut mono(), "Hello\nWorld", 10_000.0);
    assert_eq!(lines, vec!["Hello", "World"]);
}

#[test]
fn blank_paragraphs_keep_an_empty_line() {
    let lines = wrap_caption(&mut mono(), "top\n\n  \nbottom", 10_000.0);
    assert_eq!(lines, vec!["top", "", "", "bottom"]);
}

#[test]
fn crlf_breaks_are_treated_like_lf() {
    let lines = wrap_caption(&mut mono(), "a\r\nb", 100.0);
    assert_eq!(lines, vec!["a", "b"]);
}

#[test]
fn greedy_wrap_fills_lines_up_to_max_width() {
    // 10px per char: "aaa bbb" is 70px.
    let lines = wrap_paragraph(&mut mono(), "aaa bbb ccc dd", 70.0);
    assert_eq!(lines, vec!["aaa bbb", "ccc dd"]);
}

#[test]
fn lines_never_exceed_max_width_unless_single_word() {
    let text = "the quick brown fox jumps over an extraordinarily long word list";
    for max_width in [30.0, 55.0, 80.0, 120.0, 333.0] {
        let mut m = mono();
        for line in wrap_paragraph(&mut m, text, max_width) {
            let w = m.measure(&line);
            assert!(
                w <= max_width || !line.contains(' '),
                "line '{line}' is {w}px at max {max_width}"
            );
        }
    }
}

#[test]
fn oversized_word_gets_its_own_line() {
    let lines = wrap_paragraph(&mut mono(), "hi incomprehensibilities ok", 50.0);
    assert_eq!(lines, vec!["hi", "incomprehensibilities", "ok"]);
}

#[test]
fn fixed_advance_for_font_size() {
    let mut m = FixedAdvance::for_font_size(20.0);
    assert_eq!(m.measure("abcd"), 48.0);
}
