//! Input validation for values sent to the conversation service

/// Longest message body accepted from the composer
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Validates a message body and returns it trimmed
pub fn validate_message(content: &str) -> Result<String, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    let len = trimmed.chars().count();
    if len > MAX_MESSAGE_CHARS {
        return Err(format!(
            "Message too long ({} characters, max {})",
            len, MAX_MESSAGE_CHARS
        ));
    }

    Ok(trimmed.to_string())
}

/// Validates an identifier used as a URL path segment or header value
/// (conversation ids, user ids)
pub fn validate_identifier(kind: &str, id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} cannot be empty", kind));
    }

    if id.len() > 128 {
        return Err(format!("{} too long (max 128 characters)", kind));
    }

    if id.contains(|c: char| c.is_whitespace() || c.is_control() || c == '/' || c == '?' || c == '#') {
        return Err(format!("{} contains invalid characters", kind));
    }

    Ok(())
}

/// Validates the API base URL and normalizes it to end with '/'
pub fn validate_base_url(raw: &str) -> Result<String, String> {
    let url = raw.trim();
    if url.is_empty() {
        return Err("API URL cannot be empty".to_string());
    }

    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| "API URL must start with http:// or https://".to_string())?;

    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() || host.starts_with(':') {
        return Err("API URL is missing a host".to_string());
    }

    if url.contains(char::is_whitespace) {
        return Err("API URL cannot contain spaces".to_string());
    }

    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{}/", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert_eq!(validate_message("  hello  ").unwrap(), "hello");
        assert!(validate_message("").is_err());
        assert!(validate_message(" \n\t ").is_err());
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_CHARS)).is_ok());
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_CHARS + 1)).is_err());
        // Counted in characters, not bytes
        assert!(validate_message(&"é".repeat(MAX_MESSAGE_CHARS)).is_ok());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("Conversation id", "party-42").is_ok());
        assert!(validate_identifier("Conversation id", "").is_err());
        assert!(validate_identifier("Conversation id", "a b").is_err());
        assert!(validate_identifier("Conversation id", "../admin").is_err());
        assert!(validate_identifier("User id", &"u".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("http://localhost:8000/api").unwrap(),
            "http://localhost:8000/api/"
        );
        assert_eq!(
            validate_base_url("https://chat.example.org/").unwrap(),
            "https://chat.example.org/"
        );
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("localhost:8000").is_err());
        assert!(validate_base_url("http://").is_err());
        assert!(validate_base_url("http://:8000/api").is_err());
    }
}
