//! Restart requirement classification
//!
//! Decides whether WildFly needs a restart after a deployment. Configured
//! patterns are matched against the artifact name and the module's changed
//! files; the highest severity wins. When nothing matches, a few heuristics
//! based on the artifact type apply.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::config::{RestartPattern, RestartRules, WildFlyMode};
use crate::config::defaults::CONTROLLER;
use crate::error::ConfigError;

/// How strongly a restart is needed
///
/// Ordering follows severity: `None < Recommended < Required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hot deployment is enough
    None,
    /// Restart to be sure changes are picked up
    Recommended,
    /// Changes are not visible until restart
    Required,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Recommended => "recommended",
            Self::Required => "required",
        };
        f.write_str(s)
    }
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartVerdict {
    /// Restart severity
    pub severity: Severity,
    /// Human readable reason
    pub reason: String,
}

impl RestartVerdict {
    fn new(severity: Severity, reason: impl Into<String>) -> Self {
        Self {
            severity,
            reason: reason.into(),
        }
    }

    /// Whether any restart should be suggested
    pub fn needs_restart(&self) -> bool {
        self.severity != Severity::None
    }
}

/// What was deployed
#[derive(Debug, Clone, Copy)]
pub struct RestartInput<'a> {
    /// Artifact file name, e.g. `EJBPcs.jar`
    pub artifact_name: &'a str,
    /// Changed files relative to the module directory
    pub changed_files: &'a [String],
    /// Whether the artifact went to the module repository
    pub global_module: bool,
}

#[derive(Debug)]
struct CompiledRule {
    matcher: Regex,
    basename_only: bool,
    severity: Severity,
    reason: String,
}

impl CompiledRule {
    fn matches(&self, candidate: &str) -> bool {
        if self.basename_only {
            let name = candidate.rsplit('/').next().unwrap_or(candidate);
            self.matcher.is_match(name)
        } else {
            self.matcher.is_match(candidate)
        }
    }
}

/// Compiled restart rules
#[derive(Debug, Default)]
pub struct RestartMatcher {
    global_module: bool,
    rules: Vec<CompiledRule>,
}

impl RestartMatcher {
    /// Compile a rule set
    ///
    /// Each pattern must carry exactly one of `regex` or `glob`.
    pub fn compile(rules: &RestartRules) -> Result<Self, ConfigError> {
        let compiled = rules
            .patterns
            .iter()
            .enumerate()
            .map(|(index, pattern)| compile_pattern(index, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            global_module: rules.global_module,
            rules: compiled,
        })
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify a deployment
    pub fn classify(&self, input: &RestartInput<'_>) -> RestartVerdict {
        if input.global_module && self.global_module {
            return RestartVerdict::new(Severity::Required, "Global module modification");
        }

        let mut best: Option<RestartVerdict> = None;
        let mut consider = |verdict: RestartVerdict| {
            let stronger = best
                .as_ref()
                .map_or(true, |current| verdict.severity > current.severity);
            if stronger {
                best = Some(verdict);
            }
        };

        for rule in &self.rules {
            if rule.matches(input.artifact_name) {
                consider(RestartVerdict::new(rule.severity, rule.reason.clone()));
            }
        }

        for rule in &self.rules {
            if input.changed_files.iter().any(|f| rule.matches(f)) {
                tracing::debug!("Changed files match restart rule: {}", rule.reason);
                consider(RestartVerdict::new(
                    rule.severity,
                    format!("Source code changes: {}", rule.reason),
                ));
            }
        }

        best.unwrap_or_else(|| fallback(input))
    }
}

/// Heuristics used when no configured pattern matches
pub fn fallback(input: &RestartInput<'_>) -> RestartVerdict {
    let name = input.artifact_name;
    if input.global_module {
        RestartVerdict::new(Severity::Required, "Global module modification")
    } else if name.ends_with(".war") {
        RestartVerdict::new(Severity::None, "WAR hot-deployment")
    } else if name.ends_with(".jar") && name.contains("EJB") {
        RestartVerdict::new(Severity::Recommended, "EJB implementation JAR")
    } else {
        RestartVerdict::new(
            Severity::Recommended,
            "Standard deployment (restart to ensure changes are loaded)",
        )
    }
}

/// Commands that restart the local WildFly instance
pub fn restart_commands(
    wildfly_root: &Path,
    mode: WildFlyMode,
    alias: Option<&str>,
) -> Vec<String> {
    let controller = match mode {
        WildFlyMode::Domain => format!(" controller={CONTROLLER}"),
        WildFlyMode::Standalone => String::new(),
    };

    let mut commands = vec![
        format!("cd {}", wildfly_root.join("bin").display()),
        format!("./jboss-cli.sh --connect{controller} --command=\":shutdown\""),
    ];
    if let Some(alias) = alias {
        commands.push(alias.to_string());
    }
    commands
}

fn compile_pattern(index: usize, pattern: &RestartPattern) -> Result<CompiledRule, ConfigError> {
    let (source, basename_only) = match (&pattern.regex, &pattern.glob) {
        (Some(regex), None) => (regex.clone(), false),
        (None, Some(glob)) => (glob_to_regex(glob), !glob.contains('/')),
        _ => return Err(ConfigError::AmbiguousPattern { index }),
    };

    let matcher = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern
            .regex
            .clone()
            .or_else(|| pattern.glob.clone())
            .unwrap_or_default(),
        error: e.to_string(),
    })?;

    Ok(CompiledRule {
        matcher,
        basename_only,
        severity: pattern.severity,
        reason: pattern.reason.clone(),
    })
}

/// Translate a glob into an anchored regular expression
///
/// `**` crosses directory separators, `*` and `?` do not.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("^");
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    // `**/` also matches zero directories
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pattern(regex: Option<&str>, glob: Option<&str>, severity: Severity, reason: &str) -> RestartPattern {
        RestartPattern {
            regex: regex.map(String::from),
            glob: glob.map(String::from),
            severity,
            reason: reason.to_string(),
        }
    }

    fn matcher(global_module: bool, patterns: Vec<RestartPattern>) -> RestartMatcher {
        RestartMatcher::compile(&RestartRules {
            global_module,
            patterns,
        })
        .unwrap()
    }

    fn input<'a>(name: &'a str, files: &'a [String], global: bool) -> RestartInput<'a> {
        RestartInput {
            artifact_name: name,
            changed_files: files,
            global_module: global,
        }
    }

    #[test]
    fn test_war_without_rules_needs_no_restart() {
        let verdict = RestartMatcher::default().classify(&input("SinfoMto.war", &[], false));
        assert_eq!(verdict.severity, Severity::None);
        assert_eq!(verdict.reason, "WAR hot-deployment");
        assert!(!verdict.needs_restart());
    }

    #[test]
    fn test_war_with_unrelated_rules_needs_no_restart() {
        let m = matcher(
            true,
            vec![pattern(Some("^EJB.*\\.jar$"), None, Severity::Required, "EJB change")],
        );
        let verdict = m.classify(&input("SinfoMto.war", &[], false));
        assert_eq!(verdict.severity, Severity::None);
    }

    #[test]
    fn test_ejb_jar_fallback_is_recommended() {
        let verdict = RestartMatcher::default().classify(&input("EJBPcs.jar", &[], false));
        assert_eq!(verdict.severity, Severity::Recommended);
        assert_eq!(verdict.reason, "EJB implementation JAR");
    }

    #[test]
    fn test_plain_jar_fallback_is_recommended() {
        let verdict = RestartMatcher::default().classify(&input("utils.jar", &[], false));
        assert_eq!(verdict.severity, Severity::Recommended);
        assert!(verdict.reason.starts_with("Standard deployment"));
    }

    #[test]
    fn test_global_module_fallback_is_required() {
        let verdict = RestartMatcher::default().classify(&input("Shared.jar", &[], true));
        assert_eq!(verdict.severity, Severity::Required);
    }

    #[test]
    fn test_global_override_beats_patterns() {
        let m = matcher(
            true,
            vec![pattern(Some("Shared"), None, Severity::None, "never restart")],
        );
        let verdict = m.classify(&input("Shared.jar", &[], true));
        assert_eq!(verdict.severity, Severity::Required);
        assert_eq!(verdict.reason, "Global module modification");
    }

    #[test]
    fn test_without_override_global_module_uses_patterns() {
        let m = matcher(
            false,
            vec![pattern(Some("Shared"), None, Severity::Recommended, "shared lib")],
        );
        let verdict = m.classify(&input("Shared.jar", &[], true));
        assert_eq!(verdict.severity, Severity::Recommended);
        assert_eq!(verdict.reason, "shared lib");
    }

    #[test]
    fn test_required_wins_over_earlier_recommended() {
        let m = matcher(
            false,
            vec![
                pattern(Some("\\.jar$"), None, Severity::Recommended, "any jar"),
                pattern(Some("^EJB"), None, Severity::Required, "EJB interfaces"),
            ],
        );
        let verdict = m.classify(&input("EJBPcs.jar", &[], false));
        assert_eq!(verdict.severity, Severity::Required);
        assert_eq!(verdict.reason, "EJB interfaces");
    }

    #[test]
    fn test_ties_keep_first_rule() {
        let m = matcher(
            false,
            vec![
                pattern(Some("Pcs"), None, Severity::Recommended, "first"),
                pattern(Some("EJB"), None, Severity::Recommended, "second"),
            ],
        );
        assert_eq!(m.classify(&input("EJBPcs.jar", &[], false)).reason, "first");
    }

    #[test]
    fn test_changed_files_are_matched() {
        let m = matcher(
            false,
            vec![pattern(None, Some("persistence.xml"), Severity::Required, "JPA descriptor")],
        );
        let files = vec!["src/main/resources/META-INF/persistence.xml".to_string()];
        let verdict = m.classify(&input("app.war", &files, false));
        assert_eq!(verdict.severity, Severity::Required);
        assert_eq!(verdict.reason, "Source code changes: JPA descriptor");
    }

    #[test]
    fn test_artifact_match_beats_equal_source_match() {
        let m = matcher(
            false,
            vec![pattern(Some("\\.(jar|java)$"), None, Severity::Recommended, "java")],
        );
        let files = vec!["src/main/java/App.java".to_string()];
        let verdict = m.classify(&input("app.jar", &files, false));
        assert_eq!(verdict.reason, "java");
    }

    #[test]
    fn test_pattern_needs_exactly_one_kind() {
        let rules = RestartRules {
            global_module: false,
            patterns: vec![pattern(Some("a"), Some("b"), Severity::None, "x")],
        };
        assert!(matches!(
            RestartMatcher::compile(&rules),
            Err(ConfigError::AmbiguousPattern { index: 0 })
        ));

        let rules = RestartRules {
            global_module: false,
            patterns: vec![pattern(None, None, Severity::None, "x")],
        };
        assert!(RestartMatcher::compile(&rules).is_err());
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let rules = RestartRules {
            global_module: false,
            patterns: vec![pattern(Some("(unclosed"), None, Severity::Required, "x")],
        };
        assert!(matches!(
            RestartMatcher::compile(&rules),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_glob_translation() {
        let re = Regex::new(&glob_to_regex("**/META-INF/*.xml")).unwrap();
        assert!(re.is_match("src/main/resources/META-INF/ejb-jar.xml"));
        assert!(re.is_match("META-INF/beans.xml"));
        assert!(!re.is_match("META-INF/sub/beans.xml"));

        let re = Regex::new(&glob_to_regex("EJB?cs.jar")).unwrap();
        assert!(re.is_match("EJBPcs.jar"));
        assert!(!re.is_match("EJBPPcs.jar"));
    }

    #[test]
    fn test_restart_commands_by_mode() {
        let standalone = restart_commands(Path::new("/opt/wf"), WildFlyMode::Standalone, None);
        assert_eq!(standalone[0], "cd /opt/wf/bin");
        assert_eq!(standalone[1], "./jboss-cli.sh --connect --command=\":shutdown\"");

        let domain = restart_commands(Path::new("/opt/wf"), WildFlyMode::Domain, Some("mto-wildfly"));
        assert!(domain[1].contains("controller=localhost"));
        assert_eq!(domain[2], "mto-wildfly");
    }

    fn severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::None),
            Just(Severity::Recommended),
            Just(Severity::Required),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_highest_matching_severity_wins(severities in prop::collection::vec(severity(), 1..8)) {
            let patterns = severities
                .iter()
                .enumerate()
                .map(|(i, s)| pattern(Some("\\.jar$"), None, *s, &format!("rule {i}")))
                .collect();
            let m = matcher(false, patterns);
            let verdict = m.classify(&input("lib.jar", &[], false));
            let expected = severities.iter().copied().max().unwrap();
            prop_assert_eq!(verdict.severity, expected);
        }
    }
}
