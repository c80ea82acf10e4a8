#[cfg(test)]
mod tests {
    use trove::namespace_from_url;

    #[test]
    fn namespace() {
        assert_eq!(namespace_from_url("memory", "memory://wide").unwrap(), "wide");
        assert_eq!(
            namespace_from_url("memory", "memory://trading%20desk").unwrap(),
            "trading desk"
        );
    }

    #[test]
    fn invalid() {
        let error = namespace_from_url("memory", "sqlite://wide").unwrap_err();
        assert_eq!(
            format!("{:#}", error),
            "While decoding connection URL `sqlite://wide`: Expected the connection URL to start with `memory://`"
        );
        let error = namespace_from_url("memory", "memory://").unwrap_err();
        assert!(
            format!("{:#}", error).ends_with("The namespace cannot be empty"),
            "{error:#}"
        );
        assert!(namespace_from_url("memory", "wide").is_err());
    }

    #[test]
    fn invalid_long() {
        // Short in characters, long in bytes
        let url = format!("sqlite://x{}", "é".repeat(300));
        let error = namespace_from_url("memory", &url).unwrap_err();
        assert!(
            format!("{:#}", error).starts_with(&format!("While decoding connection URL `{url}`")),
            "{error:#}"
        );

        let url = format!("sqlite://x{}", "é".repeat(600));
        let error = namespace_from_url("memory", &url).unwrap_err();
        let message = format!("{:#}", error);
        let shown = message
            .strip_prefix("While decoding connection URL `")
            .and_then(|v| v.split_once("...`"))
            .map(|(v, _)| v)
            .expect("The URL is truncated");
        assert_eq!(shown.chars().count(), 497);
        assert!(url.starts_with(shown));
    }
}
