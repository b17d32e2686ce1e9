//! Output formatting for command results
//!
//! Every function renders to a `String`; nothing is printed until a command
//! has fully succeeded.

use colored::Colorize;
use npmctl_common::ProxyHost;

/// Render a domain list as `[a, b]`.
pub fn domains(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

/// Render the result of `list`: a count line, then one block per host.
pub fn host_list(hosts: &[ProxyHost]) -> String {
    let mut out = format!("Found {} proxy hosts:\n\n", hosts.len());

    for host in hosts {
        out.push_str(&format!("ID: {}\n", host.id.to_string().bold()));
        out.push_str(&format!("Domain Names: {}\n", domains(&host.domain_names)));
        out.push_str(&format!("Forward: {}\n", host.forward_target()));
        out.push_str(&format!("Enabled: {}\n", host.enabled));
        out.push_str(&format!("SSL Forced: {}\n", host.ssl_forced));
        out.push_str("---\n");
    }

    out
}

/// Render the result of `create`.
pub fn created(host: &ProxyHost) -> String {
    format!(
        "Successfully created proxy host with ID: {}\nDomain: {}\nForward: {}\n",
        host.id,
        domains(&host.domain_names),
        host.forward_target()
    )
}

/// Render the result of `delete`.
pub fn deleted(id: u64) -> String {
    format!("Successfully deleted proxy host with ID: {id}\n")
}
