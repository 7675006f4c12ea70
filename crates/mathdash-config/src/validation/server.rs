//! Listener validation.

use crate::schema::MathdashConfig;

use super::helpers::validate_range;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &MathdashConfig) {
    let server = &config.server;
    if server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }
    validate_range(errors, "server.ws_port", server.ws_port.into(), 1, 65535);
    validate_range(errors, "server.http_port", server.http_port.into(), 1, 65535);
    if server.ws_port == server.http_port {
        errors.push(format!(
            "server.ws_port and server.http_port must differ (both {})",
            server.ws_port
        ));
    }
    validate_range(
        errors,
        "server.max_messages_per_second",
        server.max_messages_per_second.into(),
        1,
        1000,
    );
}
