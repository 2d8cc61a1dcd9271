//! Plain-text rendering of an inbound request

use std::fmt::Write;

/// Snapshot of an inbound request, rendered by the echo endpoints
#[derive(Debug, Clone, Default)]
pub struct EchoRequest {
    pub protocol: String,
    pub secure: bool,
    pub path: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<String>,
    pub parameters: Vec<(String, Vec<String>)>,
    pub body: Option<String>,
}

impl EchoRequest {
    /// Group repeated query keys under their first occurrence
    pub fn add_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.parameters.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => self.parameters.push((key, vec![value])),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let transport = if self.secure {
            "via secure TLS / HTTPS"
        } else {
            "via plain HTTP"
        };

        // Writing into a String cannot fail
        let _ = write!(out, "Protocol : {} ({})\n\n", self.protocol, transport);
        let _ = write!(out, "Path : {}\n\n", self.path);
        let _ = write!(out, "Method : {}\n\n", self.method);
        out.push_str("Headers :\n\n");

        for (name, value) in &self.headers {
            let _ = writeln!(out, "  {} : {}", name, value);
        }

        out.push('\n');
        let cookies = if self.cookies.is_empty() {
            "null".to_string()
        } else {
            self.cookies.join("; ")
        };
        let _ = write!(out, "Cookies : {}\n\n", cookies);
        out.push_str("Parameters :\n");

        for (key, values) in &self.parameters {
            let _ = writeln!(out, "  {} : [{}]", key, values.join(", "));
        }

        out.push('\n');
        let _ = write!(out, "Body : {}", self.body.as_deref().unwrap_or("null"));

        out
    }
}
