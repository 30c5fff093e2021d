use crate::command::Command;

/// Path polled for the JSON status document
pub const STATUS_PATH: &str = "/StatusHandler.asp";

/// Path commands are sent to; the token is appended as the query value
pub const COMMAND_PATH: &str = "/EventHandler.asp?WebToHostItem=";

/// Builds request URLs for one receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Endpoints for the receiver at `host:port`
    pub fn new(host: &str, port: u16) -> Self {
        // Bare IPv6 literals need brackets in a URL
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };

        let base = if port == 80 {
            format!("http://{}", host)
        } else {
            format!("http://{}:{}", host, port)
        };
        Self { base }
    }

    /// URL of the JSON status document
    pub fn status_url(&self) -> String {
        format!("{}{}", self.base, STATUS_PATH)
    }

    /// URL that delivers `command`
    pub fn command_url(&self, command: &Command) -> String {
        // Tokens can carry '?', which must not read as a second query
        let token = command.token().replace('?', "%3F");
        format!("{}{}{}", self.base, COMMAND_PATH, token)
    }
}
