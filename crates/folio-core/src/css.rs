//! CSS color parsing for computed-style values.
//!
//! Built on `winnow` 0.7. Understands what `getComputedStyle` and inline
//! styles actually produce on the page: `rgb(r, g, b)`, `rgba(r, g, b, a)`,
//! the space-separated `rgb(r g b / a)` form, hex colors, and the
//! `transparent` / `white` / `black` keywords.

use crate::model::Color;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a CSS color value. Returns `None` for anything unrecognized.
pub fn parse_css_color(input: &str) -> Option<Color> {
    let mut rest = input.trim();
    let color = alt((parse_functional, parse_hex_color, parse_keyword))
        .parse_next(&mut rest)
        .ok()?;
    rest.trim().is_empty().then_some(color)
}

/// Whether a computed color string denotes "no color".
pub fn is_transparent(input: &str) -> bool {
    parse_css_color(input).is_none_or(|c| c.is_transparent())
}

fn parse_keyword(input: &mut &str) -> ModalResult<Color> {
    alt((
        "transparent".value(Color::TRANSPARENT),
        "white".value(Color::WHITE),
        "black".value(Color::BLACK),
    ))
    .parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

fn parse_functional(input: &mut &str) -> ModalResult<Color> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let _ = '('.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;

    let r = parse_channel(input)?;
    skip_separator(input);
    let g = parse_channel(input)?;
    skip_separator(input);
    let b = parse_channel(input)?;
    skip_separator(input);
    let a = opt(parse_number).parse_next(input)?.unwrap_or(1.0);

    let _ = multispace0.parse_next(input)?;
    let _ = ')'.parse_next(input)?;

    Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, a.clamp(0.0, 1.0)))
}

fn parse_channel(input: &mut &str) -> ModalResult<f32> {
    parse_number(input).map(|v| v.clamp(0.0, 255.0))
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched.parse::<f32>().map_err(|_| {
        *input = start;
        ErrMode::Backtrack(ContextError::new())
    })
}

/// Commas, slashes, and whitespace between channels.
fn skip_separator(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c == ',' || c == '/' || c.is_whitespace());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_computed_rgb() {
        let c = parse_css_color("rgb(220, 220, 220)").unwrap();
        assert_eq!(c.to_rgb8(), (220, 220, 220));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn parses_rgba_with_alpha() {
        let c = parse_css_color("rgba(0, 0, 0, 0)").unwrap();
        assert!(c.is_transparent());
        let half = parse_css_color("rgba(10, 20, 30, 0.5)").unwrap();
        assert_eq!(half.to_rgb8(), (10, 20, 30));
        assert_eq!(half.a, 0.5);
    }

    #[test]
    fn parses_space_separated_syntax() {
        let c = parse_css_color("rgb(1 2 3 / 0.25)").unwrap();
        assert_eq!(c.to_rgb8(), (1, 2, 3));
        assert_eq!(c.a, 0.25);
    }

    #[test]
    fn parses_hex_and_keywords() {
        assert_eq!(parse_css_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_css_color("#ffffff"), Some(Color::WHITE));
        assert_eq!(parse_css_color("white"), Some(Color::WHITE));
        assert_eq!(parse_css_color("  black "), Some(Color::BLACK));
        assert_eq!(parse_css_color("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_css_color(""), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
        assert_eq!(parse_css_color("hsl(10, 20%, 30%)"), None);
        assert_eq!(parse_css_color("rgb(1, 2, 3) trailing"), None);
    }

    #[test]
    fn unknown_values_count_as_transparent() {
        assert!(is_transparent("rgba(0, 0, 0, 0)"));
        assert!(is_transparent("inherit"));
        assert!(!is_transparent("rgb(0, 0, 0)"));
    }
}
