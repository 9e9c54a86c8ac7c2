use chrono::{DateTime, Duration, Utc};

/// Fields extracted from a quick-add line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// The line with recognized tokens removed
    pub title: String,
    /// From a `#project` token (last one wins)
    pub project: Option<String>,
    /// From a date word: `today`, `tomorrow`, `nextweek` / `next-week`
    pub due: Option<DateTime<Utc>>,
}

/// Parse a quick-add line like `Email Sarah tomorrow #Sales`.
///
/// Tokens are whitespace-separated. A `#word` token becomes the project and a
/// recognized date word becomes the due date; everything else re-joins into
/// the title. Matching is case-insensitive for date words only.
pub fn parse_quick_add(text: &str) -> ParsedInput {
    parse_quick_add_at(text, Utc::now())
}

/// As `parse_quick_add`, with an explicit "now" for date-word resolution.
pub fn parse_quick_add_at(text: &str, now: DateTime<Utc>) -> ParsedInput {
    let mut project = None;
    let mut due = None;
    let mut remainder: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if let Some(name) = token.strip_prefix('#') {
            if !name.is_empty() {
                project = Some(name.to_string());
                continue;
            }
        }
        if let Some(date) = interpret_date_token(&token.to_lowercase(), now) {
            due = Some(date);
            continue;
        }
        remainder.push(token);
    }

    ParsedInput {
        title: remainder.join(" "),
        project,
        due,
    }
}

fn interpret_date_token(token: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match token {
        "today" => Some(now),
        "tomorrow" => Some(now + Duration::days(1)),
        "nextweek" | "next-week" => Some(now + Duration::days(7)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        "2025-06-15T09:30:00Z".parse().unwrap()
    }

    #[test]
    fn test_plain_text_is_all_title() {
        let parsed = parse_quick_add_at("Water the plants", now());
        assert_eq!(parsed.title, "Water the plants");
        assert_eq!(parsed.project, None);
        assert_eq!(parsed.due, None);
    }

    #[test]
    fn test_project_token_extracted() {
        let parsed = parse_quick_add_at("Email Sarah #Sales", now());
        assert_eq!(parsed.title, "Email Sarah");
        assert_eq!(parsed.project.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_last_project_token_wins() {
        let parsed = parse_quick_add_at("Plan sprint #Work #Engineering", now());
        assert_eq!(parsed.project.as_deref(), Some("Engineering"));
        assert_eq!(parsed.title, "Plan sprint");
    }

    #[test]
    fn test_bare_hash_stays_in_title() {
        let parsed = parse_quick_add_at("Review PR #", now());
        assert_eq!(parsed.title, "Review PR #");
        assert_eq!(parsed.project, None);
    }

    #[test]
    fn test_date_words() {
        let parsed = parse_quick_add_at("Call mom tomorrow", now());
        assert_eq!(parsed.title, "Call mom");
        assert_eq!(parsed.due, Some(now() + Duration::days(1)));

        let parsed = parse_quick_add_at("Renew passport next-week", now());
        assert_eq!(parsed.due, Some(now() + Duration::days(7)));

        let parsed = parse_quick_add_at("Submit report TODAY", now());
        assert_eq!(parsed.title, "Submit report");
        assert_eq!(parsed.due, Some(now()));
    }

    #[test]
    fn test_combined_tokens() {
        let parsed = parse_quick_add_at("Email Sarah tomorrow #Sales", now());
        assert_eq!(parsed.title, "Email Sarah");
        assert_eq!(parsed.project.as_deref(), Some("Sales"));
        assert_eq!(parsed.due, Some(now() + Duration::days(1)));
    }

    #[test]
    fn test_whitespace_collapses() {
        let parsed = parse_quick_add_at("  Buy   milk  ", now());
        assert_eq!(parsed.title, "Buy milk");
    }
}
