//! Hand-written RFC-5321-ish e-mail address validation.
//!
//! Supports quoted local parts and backslash escapes. Does not support IP
//! address domains.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Local part of e-mail exceeds 64 characters.")]
    LocalPartTooLong,
    #[error("Character '{0}' only allowed in quotes.")]
    SpecialOutsideQuotes(char),
    #[error("Whitespace and control characters only allowed in quotes.")]
    WhitespaceOutsideQuotes,
    #[error("Two dots may only occur next to each other within quotes.")]
    ConsecutiveDots,
    #[error("@ not allowed in the domain")]
    AtInDomain,
    #[error("Domain should not have empty domain segments")]
    EmptyDomainSegment,
    #[error("Domain part should not start or end with '-'")]
    HyphenAtDomainEdge,
    #[error("Invalid domain '{0}'")]
    InvalidDomain(String),
}

fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '=' | '?' | '^' | '_'
                | '`' | '{' | '|' | '}' | '~'
        )
}

fn is_special_char(c: char) -> bool {
    matches!(c, '(' | ')' | ',' | ':' | ';' | '<' | '>' | '[' | ']')
}

pub fn validate_email(email: &str) -> Result<(), EmailError> {
    let local_part = email.split('@').next().unwrap_or("");
    if local_part.chars().count() > 64 {
        return Err(EmailError::LocalPartTooLong);
    }

    let mut is_quoted = false;
    let mut is_local_part = true;
    let mut is_escaped = false;
    let mut last_was_dot = false;
    let mut domain = String::new();

    for character in email.chars() {
        if is_local_part {
            if character == '"' {
                if is_quoted && !is_escaped {
                    is_quoted = false;
                } else if is_escaped {
                    is_escaped = false;
                } else {
                    is_quoted = true;
                }
                last_was_dot = false;
            } else if character == '\\' {
                is_escaped = true;
                last_was_dot = false;
            } else if is_atom_char(character) {
                last_was_dot = false;
                is_escaped = false;
            } else if is_special_char(character) {
                if !is_quoted {
                    return Err(EmailError::SpecialOutsideQuotes(character));
                }
                last_was_dot = false;
            } else if character == '@' {
                if !is_quoted {
                    is_local_part = false;
                    last_was_dot = false;
                }
            } else if character == '.' {
                if last_was_dot && !is_quoted {
                    return Err(EmailError::ConsecutiveDots);
                }
                last_was_dot = true;
                is_escaped = false;
            } else if character.is_whitespace() || character.is_control() {
                if !is_quoted {
                    return Err(EmailError::WhitespaceOutsideQuotes);
                }
                last_was_dot = false;
            }
        } else if character == '@' {
            return Err(EmailError::AtInDomain);
        } else {
            domain.push(character);
        }
    }

    for domain_part in domain.split('.') {
        if domain_part.is_empty() {
            return Err(EmailError::EmptyDomainSegment);
        }
        if domain_part.starts_with('-') || domain_part.ends_with('-') {
            return Err(EmailError::HyphenAtDomainEdge);
        }
    }

    let valid_labels = domain
        .split('.')
        .all(|part| part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    if domain.is_empty() || !valid_labels {
        return Err(EmailError::InvalidDomain(domain));
    }

    Ok(())
}
