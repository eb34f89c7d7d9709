#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::config::Newline;

fn writer() -> IndentedWriter {
    let config = BufferConfig::default().with_newline(Newline::Lf);
    IndentedWriter::with_config(Indentation::spaces(4), config).unwrap()
}

// === Inline Appends ===

#[test]
fn inline_indents_once_per_line() {
    let mut w = writer();
    w.indent();
    w.append_inline("a").unwrap();
    w.append_inline("b").unwrap();
    assert_eq!(w.as_str(), "    ab");
    assert!(w.is_line_started());
}

#[test]
fn inline_empty_writes_nothing() {
    let mut w = writer();
    w.indent();
    w.append_inline("").unwrap();
    assert_eq!(w.as_str(), "");
    assert!(!w.is_line_started());
}

#[test]
fn inline_passes_terminators_through() {
    let mut w = writer();
    w.indent();
    w.append_inline("abcd\nefgh\r\nijk").unwrap();
    assert_eq!(w.as_str(), "    abcd\nefgh\r\nijk");
}

#[test]
fn inline_appends_merge_into_one_line() {
    let mut w = writer();
    w.append_inline("A").unwrap();
    w.append_inline(",").unwrap();
    w.break_line().unwrap();
    w.append_line("B,").unwrap();
    assert_eq!(w.as_str(), "A,\nB,\n");
}

// === Line-Aware Appends ===

#[test]
fn append_breaks_between_lines_only() {
    let mut w = writer();
    w.indent();
    w.append("one\r\ntwo\rthree").unwrap();
    assert_eq!(w.as_str(), "    one\n    two\n    three");
    assert!(w.is_line_started());
}

#[test]
fn append_continues_started_line() {
    let mut w = writer();
    w.indent();
    w.append_inline("x = ").unwrap();
    w.append("1;\n2;").unwrap();
    assert_eq!(w.as_str(), "    x = 1;\n    2;");
}

#[test]
fn append_trailing_terminator_leaves_fresh_line() {
    let mut w = writer();
    w.append("a\n").unwrap();
    assert_eq!(w.as_str(), "a\n");
    assert!(!w.is_line_started());
}

#[test]
fn append_line_breaks_after_every_line() {
    let mut w = writer();
    w.indent();
    w.append_line("one\ntwo").unwrap();
    assert_eq!(w.as_str(), "    one\n    two\n");
    assert!(!w.is_line_started());
}

#[test]
fn append_line_empty_is_one_break() {
    let mut w = writer();
    w.indent();
    w.append_line("").unwrap();
    assert_eq!(w.as_str(), "\n");
}

#[test]
fn append_line_trailing_terminator_adds_blank_line() {
    let mut w = writer();
    w.append_line("a\n").unwrap();
    assert_eq!(w.as_str(), "a\n\n");
}

#[test]
fn blank_lines_carry_no_indentation() {
    let mut w = writer();
    w.indent();
    w.append_line("a\n\nb").unwrap();
    assert_eq!(w.as_str(), "    a\n\n    b\n");
}

#[test]
fn input_terminators_are_normalized() {
    let mut w = IndentedWriter::new(Indentation::spaces(2));
    w.append_line("a\nb\rc").unwrap();
    assert_eq!(w.as_str(), "a\r\nb\r\nc\r\n");
}

// === Characters ===

#[test]
fn append_char_breaks_on_terminators() {
    let mut w = writer();
    w.indent();
    w.append_char('a').unwrap();
    w.append_char('\n').unwrap();
    w.append_char('b').unwrap();
    assert_eq!(w.as_str(), "    a\n    b");
}

#[test]
fn append_line_char() {
    let mut w = writer();
    w.append_line_char('{').unwrap();
    assert_eq!(w.as_str(), "{\n");
}

#[test]
fn break_line_on_empty_line() {
    let mut w = writer();
    w.break_line().unwrap();
    w.break_line().unwrap();
    assert_eq!(w.as_str(), "\n\n");
}

#[test]
fn finish_line_only_breaks_started_lines() {
    let mut w = writer();
    w.finish_line().unwrap();
    assert_eq!(w.as_str(), "");
    w.append_inline("a").unwrap();
    w.finish_line().unwrap();
    w.finish_line().unwrap();
    assert_eq!(w.as_str(), "a\n");
}

// === Formatted Appends ===

#[test]
fn inline_fmt() {
    let mut w = writer();
    w.indent();
    let (left, right) = ("int.MaxValue", 432);
    w.append_inline_fmt(format_args!("return {left} - {right};"))
        .unwrap();
    assert_eq!(w.as_str(), "    return int.MaxValue - 432;");
}

#[test]
fn line_fmt_indents_each_line() {
    let mut w = writer();
    w.indent();
    let body = "first\nsecond";
    w.append_line_fmt(format_args!("{body}")).unwrap();
    assert_eq!(w.as_str(), "    first\n    second\n");
}

#[test]
fn fmt_crlf_split_across_arguments() {
    let mut w = writer();
    let (head, tail) = ("a\r", "\nb");
    w.append_fmt(format_args!("{head}{tail}")).unwrap();
    assert_eq!(w.as_str(), "a\nb");
}

#[test]
fn fmt_matches_plain_append() {
    let text = "x\r\ny\n\nz\r";
    let mut plain = writer();
    plain.indent();
    plain.append(text).unwrap();

    let mut formatted = writer();
    formatted.indent();
    formatted.append_fmt(format_args!("{text}")).unwrap();

    assert_eq!(plain.as_str(), formatted.as_str());
}

#[test]
fn append_display() {
    let mut w = writer();
    w.append_display(&3.5).unwrap();
    w.append_inline(" ").unwrap();
    w.append_display("text").unwrap();
    assert_eq!(w.as_str(), "3.5 text");
}

// === Nesting ===

#[test]
fn nesting_scope_restores_depth() {
    let mut w = writer();
    {
        let mut scope = w.enter_nesting();
        assert_eq!(scope.depth(), 1);
        {
            let inner = scope.enter_nesting();
            assert_eq!(inner.depth(), 2);
        }
        assert_eq!(scope.depth(), 1);
    }
    assert_eq!(w.depth(), 0);
    assert_eq!(w.as_str(), "");
}

#[test]
fn depth_applies_immediately() {
    let mut w = writer();
    w.append_line("top").unwrap();
    {
        let mut scope = w.enter_nesting();
        scope.append_line("nested").unwrap();
    }
    w.append_line("top").unwrap();
    assert_eq!(w.as_str(), "top\n    nested\ntop\n");
}

#[test]
fn depth_change_mid_line_does_not_reindent() {
    let mut w = writer();
    w.append_inline("head").unwrap();
    {
        let mut scope = w.enter_nesting();
        scope.append_line(" tail").unwrap();
        scope.append_line("body").unwrap();
    }
    assert_eq!(w.as_str(), "head tail\n    body\n");
}

#[test]
fn with_indent_closure() {
    let mut w = writer();
    let depth = w.with_indent(|w| {
        w.append_line("inside").unwrap();
        w.depth()
    });
    assert_eq!(depth, 1);
    assert_eq!(w.depth(), 0);
    assert_eq!(w.as_str(), "    inside\n");
}

#[test]
fn nesting_released_on_unwind() {
    let mut w = writer();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _scope = w.enter_nesting();
        panic!("abort the scope");
    }));
    assert!(result.is_err());
    assert_eq!(w.depth(), 0);
}

// === Indentation Styles ===

#[test]
fn tab_indentation() {
    let mut w = IndentedWriter::new(Indentation::tabs());
    w.indent();
    w.indent();
    w.append("x").unwrap();
    assert_eq!(w.as_str(), "\t\tx");
}

#[test]
fn zero_size_indentation() {
    let mut w = writer();
    w.indentation = Indentation::spaces(0);
    w.indent();
    w.append_line("flat").unwrap();
    assert_eq!(w.as_str(), "flat\n");
}

// === Output ===

#[test]
fn render_does_not_consume() {
    let mut w = writer();
    w.append_line("a").unwrap();
    let first = w.render();
    w.append_line("b").unwrap();
    assert_eq!(first, "a\n");
    assert_eq!(w.render(), "a\nb\n");
    assert_eq!(w.finish().unwrap(), "a\nb\n");
}

#[test]
fn deferred_error_is_reported_once() {
    let mut w = writer();
    w.defer_error(BufferError::ZeroCapacity);
    w.defer_error(BufferError::Allocation { requested: 1 });
    assert_eq!(w.take_deferred_error(), Some(BufferError::ZeroCapacity));
    assert_eq!(w.take_deferred_error(), None);
}

#[test]
fn oversized_indentation_fails_without_starting_line() {
    let mut w = IndentedWriter::new(Indentation::spaces(usize::MAX));
    w.append_inline("x").unwrap();
    w.break_line().unwrap();
    w.indent();

    let err = w.append_inline("y").unwrap_err();
    assert_eq!(err, BufferError::Allocation { requested: usize::MAX });
    assert!(!w.is_line_started());
    assert_eq!(w.as_str(), "x\r\n");
}
