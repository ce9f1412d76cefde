//! Defines `Segment` and `PathPattern` for `Tree`.
use std::fmt;

use log::trace;

use crate::error::{PatternFault, RouteError};

/// Characters which may not appear in literal text or parameter names.
const RESERVED: [char; 6] = ['?', '#', '[', ']', '{', '}'];

/// One `/` delimited component of a route pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Is matched exactly (string equality) to the corresponding segment of incoming request
    /// paths.
    Literal(String),

    /// Matches any non-empty segment of incoming request paths, binding it to the given name.
    Parameter(String),
}

impl Segment {
    /// The literal text or the parameter name of this segment.
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Literal(text) | Segment::Parameter(text) => text,
        }
    }

    /// True for `Segment::Parameter`.
    pub fn is_parameter(&self) -> bool {
        matches!(self, Segment::Parameter(_))
    }
}

/// A validated route pattern such as `discovery/{version}/rest:batchGet`.
///
/// Patterns are `/` separated lists of segments, each either literal text or a `{name}`
/// parameter. The final segment may carry a custom method, introduced by a colon, which is stored
/// including its colon (`:batchGet`). A colon which should be part of a literal is escaped as
/// `\:`.
///
/// ```rust
/// use endpoints_dispatcher::router::tree::segment::{PathPattern, Segment};
///
/// let pattern = PathPattern::parse("discovery/{version}/rest:batchGet").unwrap();
/// assert_eq!(
///     pattern.segments(),
///     &[
///         Segment::Literal("discovery".to_owned()),
///         Segment::Parameter("version".to_owned()),
///         Segment::Literal("rest".to_owned()),
///     ]
/// );
/// assert_eq!(pattern.custom_method(), Some(":batchGet"));
///
/// assert!(PathPattern::parse("discovery/{version}:batchGet/rest").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    custom_method: Option<String>,
}

impl PathPattern {
    /// Parses and validates a route pattern.
    ///
    /// A single leading `/` is ignored, and the empty pattern addresses the root.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        trace!(" parsing pattern `{}`", pattern);
        let invalid = |fault| RouteError::invalid(pattern, fault);

        let path = pattern.strip_prefix('/').unwrap_or(pattern);
        let mut segments = Vec::new();
        let mut custom_method = None;

        if !path.is_empty() {
            let raw_segments: Vec<&str> = path.split('/').collect();
            let last = raw_segments.len() - 1;

            for (i, raw) in raw_segments.into_iter().enumerate() {
                if raw.is_empty() {
                    return Err(invalid(PatternFault::EmptySegment));
                }

                let (head, suffix) = split_custom_method(raw);
                if let Some(suffix) = suffix {
                    if i != last {
                        return Err(invalid(PatternFault::CustomMethodNotLast(raw.to_owned())));
                    }
                    custom_method = Some(parse_custom_method(raw, suffix).map_err(invalid)?);
                }

                let segment = parse_segment(raw, head).map_err(invalid)?;
                if let Segment::Parameter(name) = &segment {
                    if segments.contains(&segment) {
                        return Err(invalid(PatternFault::DuplicateParameterName(name.clone())));
                    }
                }
                segments.push(segment);
            }
        }

        Ok(PathPattern {
            raw: pattern.to_owned(),
            segments,
            custom_method,
        })
    }

    /// The pattern text as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The segments of this pattern, with the custom method removed from the final one.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The custom method of the final segment, including its leading colon.
    pub fn custom_method(&self) -> Option<&str> {
        self.custom_method.as_deref()
    }

    /// Names of all parameters, in path order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_parameter())
            .map(Segment::as_str)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Splits a segment at its first unescaped colon. The head is returned unescaped, the suffix raw
// and including the colon.
fn split_custom_method(segment: &str) -> (String, Option<&str>) {
    let mut head = String::with_capacity(segment.len());
    let mut chars = segment.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, ':'))) => {
                head.push(':');
                chars.next();
            }
            ':' => return (head, Some(&segment[i..])),
            _ => head.push(c),
        }
    }

    (head, None)
}

fn parse_custom_method(segment: &str, suffix: &str) -> Result<String, PatternFault> {
    let method = &suffix[1..];
    if method.contains(|c: char| c == '{' || c == '}') {
        return Err(PatternFault::ParameterInCustomMethod(segment.to_owned()));
    }

    match split_custom_method(method) {
        (_, Some(_)) => Err(PatternFault::MultipleCustomMethods(segment.to_owned())),
        (method, None) => match method.chars().find(|c| RESERVED.contains(c)) {
            Some(character) => Err(PatternFault::ReservedCharacter {
                segment: segment.to_owned(),
                character,
            }),
            None => Ok(format!(":{}", method)),
        },
    }
}

fn parse_segment(segment: &str, head: String) -> Result<Segment, PatternFault> {
    if head.starts_with('{') {
        let name = head
            .strip_prefix('{')
            .and_then(|h| h.strip_suffix('}'))
            .ok_or_else(|| PatternFault::MalformedParameter(segment.to_owned()))?;

        if !is_valid_name(name) {
            return Err(PatternFault::InvalidParameterName(name.to_owned()));
        }

        return Ok(Segment::Parameter(name.to_owned()));
    }

    if head.is_empty() {
        return Err(PatternFault::EmptySegment);
    }

    match head.chars().find(|c| RESERVED.contains(c)) {
        Some(character) => Err(PatternFault::ReservedCharacter {
            segment: segment.to_owned(),
            character,
        }),
        None => Ok(Segment::Literal(head)),
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == ':' || c == '/' || RESERVED.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(pattern: &str) -> PatternFault {
        match PathPattern::parse(pattern) {
            Err(RouteError::InvalidPattern { fault, .. }) => fault,
            other => panic!("expected `{}` to be invalid, got {:?}", pattern, other),
        }
    }

    fn literal(s: &str) -> Segment {
        Segment::Literal(s.to_owned())
    }

    fn parameter(s: &str) -> Segment {
        Segment::Parameter(s.to_owned())
    }

    #[test]
    fn parses_literals_and_parameters() {
        let pattern = PathPattern::parse("discovery/{discovery_version}/apis/{api}").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                literal("discovery"),
                parameter("discovery_version"),
                literal("apis"),
                parameter("api")
            ]
        );
        assert_eq!(pattern.custom_method(), None);
        assert_eq!(
            pattern.parameter_names().collect::<Vec<_>>(),
            vec!["discovery_version", "api"]
        );
    }

    #[test]
    fn leading_slash_and_root() {
        assert_eq!(
            PathPattern::parse("/explorer").unwrap().segments(),
            PathPattern::parse("explorer").unwrap().segments()
        );
        assert!(PathPattern::parse("").unwrap().segments().is_empty());
        assert!(PathPattern::parse("/").unwrap().segments().is_empty());
    }

    #[test]
    fn parses_custom_methods() {
        let pattern = PathPattern::parse("discovery/rest:batchGet").unwrap();
        assert_eq!(pattern.segments(), &[literal("discovery"), literal("rest")]);
        assert_eq!(pattern.custom_method(), Some(":batchGet"));

        let pattern = PathPattern::parse("discovery/{version}:batchGet").unwrap();
        assert_eq!(pattern.segments(), &[literal("discovery"), parameter("version")]);
        assert_eq!(pattern.custom_method(), Some(":batchGet"));

        let pattern = PathPattern::parse("discovery/{version}/rest:").unwrap();
        assert_eq!(pattern.custom_method(), Some(":"));

        let pattern = PathPattern::parse("discovery/{version}/rest:12invalidMethod").unwrap();
        assert_eq!(pattern.custom_method(), Some(":12invalidMethod"));
    }

    #[test]
    fn escaped_colon_is_literal_text() {
        let pattern = PathPattern::parse("files/a\\:b").unwrap();
        assert_eq!(pattern.segments(), &[literal("files"), literal("a:b")]);
        assert_eq!(pattern.custom_method(), None);

        let pattern = PathPattern::parse("a\\:b/c").unwrap();
        assert_eq!(pattern.segments(), &[literal("a:b"), literal("c")]);

        let pattern = PathPattern::parse("a\\:b:run").unwrap();
        assert_eq!(pattern.segments(), &[literal("a:b")]);
        assert_eq!(pattern.custom_method(), Some(":run"));
    }

    #[test]
    fn rejects_parameters_in_custom_methods() {
        assert_eq!(
            fault("discovery/prefix:{version}"),
            PatternFault::ParameterInCustomMethod("prefix:{version}".to_owned())
        );
        assert_eq!(
            fault("discovery/{major}:{minor}"),
            PatternFault::ParameterInCustomMethod("{major}:{minor}".to_owned())
        );
    }

    #[test]
    fn rejects_misplaced_custom_methods() {
        assert_eq!(
            fault("discovery/{version}/rest:batchGet:batchGet"),
            PatternFault::MultipleCustomMethods("rest:batchGet:batchGet".to_owned())
        );
        assert_eq!(
            fault("discovery/{version}:batchGet/rest"),
            PatternFault::CustomMethodNotLast("{version}:batchGet".to_owned())
        );
        assert_eq!(fault("discovery/:batchGet"), PatternFault::EmptySegment);
    }

    #[test]
    fn rejects_malformed_parameters() {
        assert_eq!(
            fault("bad/{[test}"),
            PatternFault::InvalidParameterName("[test".to_owned())
        );
        assert_eq!(
            fault("bad/{test"),
            PatternFault::MalformedParameter("{test".to_owned())
        );
        assert_eq!(
            fault("bad/{test}unexpected/afterBad"),
            PatternFault::MalformedParameter("{test}unexpected".to_owned())
        );
        assert_eq!(fault("bad/{}"), PatternFault::InvalidParameterName(String::new()));
        assert_eq!(
            fault("bad/{a\\:b}"),
            PatternFault::InvalidParameterName("a:b".to_owned())
        );
    }

    #[test]
    fn rejects_reserved_characters() {
        for c in "?#[]{}".chars() {
            let pattern = format!("bad/{}", c);
            assert!(PathPattern::parse(&pattern).is_err(), "accepted `{}`", pattern);
        }

        assert_eq!(
            fault("bad/a?b"),
            PatternFault::ReservedCharacter {
                segment: "a?b".to_owned(),
                character: '?'
            }
        );
        assert_eq!(
            fault("bad/rest:get#1"),
            PatternFault::ReservedCharacter {
                segment: "rest:get#1".to_owned(),
                character: '#'
            }
        );
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(fault("a//b"), PatternFault::EmptySegment);
        assert_eq!(fault("a/b/"), PatternFault::EmptySegment);
    }

    #[test]
    fn rejects_repeated_parameter_names() {
        assert_eq!(
            fault("{id}/children/{id}"),
            PatternFault::DuplicateParameterName("id".to_owned())
        );
    }

    #[test]
    fn error_reports_the_supplied_pattern() {
        match PathPattern::parse("/bad/{test") {
            Err(RouteError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "/bad/{test"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
