#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Server base URL, scheme included (e.g. `https://school.example.com`).
    pub domain: String,
}

impl CoreConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Host portion of the domain, with the scheme stripped.
    pub fn host(&self) -> &str {
        self.domain
            .split_once("://")
            .map(|(_, host)| host)
            .unwrap_or(&self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_strips_scheme() {
        assert_eq!(CoreConfig::new("https://school.test").host(), "school.test");
        assert_eq!(CoreConfig::new("school.test:8080").host(), "school.test:8080");
    }
}
