//! Changed file discovery helpers
//!
//! Parses `git status --porcelain` output into module-relative paths.

/// Parse `git status --porcelain` (v1) output
///
/// Returns repository-relative paths. Renames report the new path and
/// ignored entries (`!!`) are skipped.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.len() > 3 && !line.starts_with("!!"))
        .map(|line| {
            let path = &line[3..];
            let path = path.rsplit(" -> ").next().unwrap_or(path);
            unquote(path)
        })
        .collect()
}

/// Strip the repository prefix of the module from each path
///
/// `prefix` is the output of `git rev-parse --show-prefix`, e.g. `EJBPcs/`.
/// Paths outside the module are dropped.
pub fn relative_to_module(paths: Vec<String>, prefix: &str) -> Vec<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return paths;
    }

    paths
        .into_iter()
        .filter_map(|p| p.strip_prefix(prefix).map(str::to_string))
        .collect()
}

/// Whether a walked path should be ignored when no git data is available
pub fn is_build_output(relative: &str) -> bool {
    let first = relative.split('/').next().unwrap_or(relative);
    matches!(first, "target" | ".git" | ".idea" | ".settings")
}

fn unquote(path: &str) -> String {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .map_or_else(|| path.to_string(), |p| p.replace("\\\"", "\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_porcelain() {
        let output = " M EJBPcs/src/main/java/A.java\n\
                      ?? EJBPcs/src/main/resources/META-INF/persistence.xml\n\
                      R  old/B.java -> EJBPcs/src/B.java\n\
                      !! EJBPcs/target/\n\
                      A  \"with space.txt\"\n";
        let paths = parse_porcelain(output);
        assert_eq!(
            paths,
            vec![
                "EJBPcs/src/main/java/A.java",
                "EJBPcs/src/main/resources/META-INF/persistence.xml",
                "EJBPcs/src/B.java",
                "with space.txt",
            ]
        );
    }

    #[test]
    fn test_relative_to_module() {
        let paths = vec![
            "EJBPcs/src/A.java".to_string(),
            "Other/src/B.java".to_string(),
        ];
        assert_eq!(
            relative_to_module(paths.clone(), "EJBPcs/\n"),
            vec!["src/A.java"]
        );
        assert_eq!(relative_to_module(paths.clone(), ""), paths);
    }

    #[test]
    fn test_build_output_is_skipped() {
        assert!(is_build_output("target/classes/A.class"));
        assert!(is_build_output(".git/HEAD"));
        assert!(!is_build_output("src/main/java/target/A.java"));
    }
}
