//! The requirement-placing API handed to format detectors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::{DetectResult, DetectionError, RequirementsUnmet};
use super::paths::{compile_exclusions, is_path_within_root, FilePattern};
use super::probe::TextProbe;

/// The result of one atomic requirement, kept for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequirementOutcome {
    pub passed: bool,
    pub requirement: String,
}

/// Bookkeeping for one `require_any` block.
#[derive(Debug, Default)]
struct AlternationScope {
    failed_alternatives: Vec<String>,
    had_successful_alternatives: bool,
    alternatives_run: usize,
    /// Set while one of this scope's `alternative` bodies is running.
    suspended: bool,
}

/// Information about the dataset whose format is being detected, plus the
/// methods that place requirements on it.
///
/// Every requirement method returns [`DetectionError::Unmet`] if the
/// requirement is not met; on success the return value depends on the
/// method. Detectors get a fresh context from
/// [`apply_format_detector`](super::apply_format_detector) and should not
/// build one themselves.
///
/// Alternation is tracked with an explicit stack of scopes. Only the top
/// scope can be active; it is suspended while one of its alternatives runs,
/// which is what makes ordinary requirements legal inside an alternative and
/// illegal directly inside `require_any`.
#[derive(Debug)]
pub struct DetectionContext {
    root_path: PathBuf,
    scopes: Vec<AlternationScope>,
    outcomes: Vec<RequirementOutcome>,
}

impl DetectionContext {
    pub(crate) fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            scopes: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// The dataset root. Detectors should prefer the requirement methods.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Every atomic requirement placed so far, in order.
    pub fn outcomes(&self) -> &[RequirementOutcome] {
        &self.outcomes
    }

    pub(crate) fn into_outcomes(self) -> Vec<RequirementOutcome> {
        self.outcomes
    }

    fn in_active_scope(&self) -> bool {
        self.scopes.last().is_some_and(|scope| !scope.suspended)
    }

    fn start_requirement(&self, req_type: &str) -> DetectResult<()> {
        if self.in_active_scope() {
            return Err(DetectionError::contract(format!(
                "a requirement ({}) can't be placed directly within a 'require_any' block",
                req_type
            )));
        }
        Ok(())
    }

    fn record(&mut self, passed: bool, requirement: &str) {
        self.outcomes.push(RequirementOutcome {
            passed,
            requirement: requirement.to_string(),
        });
    }

    fn unmet<T>(&mut self, requirement_desc: String) -> DetectResult<T> {
        self.record(false, &requirement_desc);
        Err(RequirementsUnmet::single(requirement_desc).into())
    }

    /// Places a requirement that is never met.
    pub fn fail<T>(&mut self, requirement_desc: impl Into<String>) -> DetectResult<T> {
        self.start_requirement("fail")?;
        self.unmet(requirement_desc.into())
    }

    /// Requires a regular file matching `pattern` somewhere under the root and
    /// returns its root-relative, `/`-separated path.
    ///
    /// `pattern` is a glob relative to the root; a `**` segment matches zero or
    /// more directories. Files whose name matches any of `exclude_fnames` are
    /// skipped. If several files qualify, which one is returned is unspecified.
    pub fn require_file(&mut self, pattern: &str, exclude_fnames: &[&str]) -> DetectResult<String> {
        self.start_requirement("require_file")?;

        let mut requirement_desc = format!("dataset must contain a file matching pattern \"{}\"", pattern);
        if !exclude_fnames.is_empty() {
            let names: Vec<String> = exclude_fnames.iter().map(|e| format!("\"{}\"", e)).collect();
            requirement_desc.push_str(&format!(" (but not named {})", names.join(", ")));
        }

        if !is_path_within_root(pattern) {
            return self.unmet(requirement_desc);
        }

        let compiled = FilePattern::compile(pattern)
            .and_then(|p| compile_exclusions(exclude_fnames).map(|ex| (p, ex)));
        let (file_pattern, exclusions) = match compiled {
            Ok(compiled) => compiled,
            Err(err) => {
                tracing::trace!("invalid pattern \"{}\": {}", pattern, err);
                return self.unmet(requirement_desc);
            }
        };

        match file_pattern.find_first(&self.root_path, &exclusions) {
            Some(found) => {
                self.record(true, &requirement_desc);
                Ok(found)
            }
            None => self.unmet(requirement_desc),
        }
    }

    /// Places a requirement on the contents of the text file at `path`.
    ///
    /// The file is opened as UTF-8 and passed to `body` together with the
    /// context, so the body may place further requirements. The requirement
    /// is met if `path` stays inside the root, the file opens, and `body`
    /// returns `Ok`.
    ///
    /// A [`DetectionError::Unmet`] from `body` is returned as-is, so the
    /// nested requirement's message survives. Contract violations also pass
    /// through. Any other failure becomes an unmet requirement described as
    /// `"{path}: {requirement_desc}"`. The file is closed before this returns.
    pub fn probe_text_file<T, F>(
        &mut self,
        path: &str,
        requirement_desc: &str,
        body: F,
    ) -> DetectResult<T>
    where
        F: FnOnce(&mut DetectionContext, &mut TextProbe) -> DetectResult<T>,
    {
        self.start_requirement("probe_text_file")?;

        let requirement_desc_full = format!("{}: {}", path, requirement_desc);

        if !is_path_within_root(path) {
            return self.unmet(requirement_desc_full);
        }

        let outcome = match TextProbe::open(&self.root_path.join(path), path) {
            Ok(mut probe) => body(self, &mut probe),
            Err(err) => Err(err.into()),
        };

        match outcome {
            Ok(value) => {
                self.record(true, &requirement_desc_full);
                Ok(value)
            }
            Err(err @ (DetectionError::Unmet(_) | DetectionError::ContractViolation(_))) => {
                Err(err)
            }
            Err(err) => {
                tracing::trace!("probe of '{}' failed: {}", path, err);
                self.unmet(requirement_desc_full)
            }
        }
    }

    /// Places a requirement that is met if at least one of several alternative
    /// sets of requirements is met.
    ///
    /// `body` must not place requirements itself; it calls
    /// [`alternative`](Self::alternative) once per set:
    ///
    /// ```
    /// # use labelprobe::detection::{DetectionContext, DetectResult};
    /// fn requirements(context: &mut DetectionContext) -> DetectResult<()> {
    ///     context.require_any(|context| {
    ///         context.alternative(|context| context.require_file("data.yaml", &[]))?;
    ///         context.alternative(|context| context.require_file("classes.txt", &[]))?;
    ///         Ok(())
    ///     })
    /// }
    /// ```
    ///
    /// Every alternative runs, even after one has been met. If none is met,
    /// the failure lists of all alternatives are concatenated in order. Leaving
    /// the block without running any alternative is a contract violation.
    pub fn require_any<F>(&mut self, body: F) -> DetectResult<()>
    where
        F: FnOnce(&mut DetectionContext) -> DetectResult<()>,
    {
        self.start_requirement("require_any")?;

        self.scopes.push(AlternationScope::default());
        let outcome = body(self);
        let scope = self.scopes.pop().ok_or_else(|| {
            DetectionError::contract("alternation scope was removed by a nested block")
        })?;
        outcome?;

        if scope.had_successful_alternatives {
            return Ok(());
        }

        if scope.alternatives_run == 0 {
            return Err(DetectionError::contract(
                "a 'require_any' block must contain at least one 'alternative' block",
            ));
        }

        match RequirementsUnmet::new(scope.failed_alternatives) {
            Some(unmet) => Err(unmet.into()),
            None => Err(DetectionError::contract(
                "a failed 'alternative' block reported no unmet requirements",
            )),
        }
    }

    /// Defines one alternative set of requirements inside
    /// [`require_any`](Self::require_any).
    ///
    /// Returns `Some` with the body's value if its requirements were met and
    /// `None` if they were not; in that case the failures are recorded on the
    /// enclosing `require_any`. Errors other than unmet requirements are
    /// returned unchanged.
    pub fn alternative<T, F>(&mut self, body: F) -> DetectResult<Option<T>>
    where
        F: FnOnce(&mut DetectionContext) -> DetectResult<T>,
    {
        let depth = self.scopes.len();
        match self.scopes.last_mut() {
            Some(scope) if !scope.suspended => {
                scope.suspended = true;
                scope.alternatives_run += 1;
            }
            _ => {
                return Err(DetectionError::contract(
                    "an 'alternative' block must be directly within a 'require_any' block",
                ))
            }
        }

        let outcome = body(self);

        let scope = self
            .scopes
            .get_mut(depth - 1)
            .ok_or_else(|| DetectionError::contract("alternation scope was removed by a nested block"))?;
        scope.suspended = false;

        match outcome {
            Ok(value) => {
                scope.had_successful_alternatives = true;
                Ok(Some(value))
            }
            Err(DetectionError::Unmet(unmet)) => {
                scope
                    .failed_alternatives
                    .extend(unmet.into_failed_alternatives());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
