use counter_common::{Command, ParseCommandError};

/// A script token that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token {position}: {source}")]
pub struct ScriptError {
    /// 1-based token position within the script.
    pub position: usize,
    #[source]
    pub source: ParseCommandError,
}

/// Parse a command script such as `"inc, inc, dec reset"`.
///
/// Tokens are separated by whitespace and/or commas. An empty script is an
/// empty command list.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token.parse().map_err(|source| ScriptError {
                position: i + 1,
                source,
            })
        })
        .collect()
}
