//! Rule evaluation and rule-table management.
//!
//! The [`ConjugationManager`] owns every conjugation rule, every paradigm and
//! the per-combination suppression flags. Derivation is pure over these
//! tables: rules for the requested part of speech and combination are sorted
//! by index, gated by class values and filter pattern, and their steps run in
//! order over a working string.
//!
//! Malformed patterns never abort a derivation. The offending rule or step
//! becomes a no-op and the error is recorded in [`Derivation::faults`].

use im::{OrdMap, OrdSet};
use polyglot_foundation::{
    CombinationId, DimensionId, Error, ErrorContext, PosId, Result, RuleId,
};
use polyglot_lexicon::{Word, WordForm};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::paradigm::{Combination, Paradigm};
use crate::rule::{ConjugationRule, RuleOutcome};

// =============================================================================
// Derivation results
// =============================================================================

/// What one step did during a derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepTrace {
    /// The step, as `regex -> replacement`.
    pub step: String,
    /// Working string before the step.
    pub before: String,
    /// Working string after the step.
    pub after: String,
    /// The step's pattern or replacement is malformed; it changed nothing.
    pub malformed: bool,
}

/// What one rule did during a derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTrace {
    /// The rule.
    pub rule: RuleId,
    /// The rule's name.
    pub name: String,
    /// Whether it ran, and why not if it did not.
    pub outcome: RuleOutcome,
    /// Steps, for rules that ran.
    pub steps: Vec<StepTrace>,
}

/// The result of deriving one combination of one word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivation {
    /// The derived form.
    pub value: String,
    /// At least one rule passed its filters and ran.
    pub applied: bool,
    /// The combination is suppressed for the part of speech; `value` is empty.
    pub suppressed: bool,
    /// Per-rule trace, when trace recording is on.
    pub trace: Vec<RuleTrace>,
    /// Malformed patterns met along the way.
    pub faults: Vec<Error>,
}

impl Derivation {
    /// A derivation that returns `value` untouched.
    #[must_use]
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            applied: false,
            suppressed: false,
            trace: Vec::new(),
            faults: Vec::new(),
        }
    }

    /// Returns true if no malformed pattern was met.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// One change made by a sound-change (evolution) pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evolution {
    /// What was changed (rule name, or combination of a stored form).
    pub subject: String,
    /// Text before the change.
    pub before: String,
    /// Text after the change, or the rejected text when `error` is set.
    pub after: String,
    /// Why the change was reverted.
    pub error: Option<String>,
}

// =============================================================================
// Conjugation Manager
// =============================================================================

/// Conjugation rules, paradigms and suppression flags of a language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConjugationManager {
    rules: OrdMap<RuleId, ConjugationRule>,
    paradigms: OrdMap<PosId, Paradigm>,
    suppressed: OrdSet<(PosId, CombinationId)>,
    next_rule: u32,
}

impl ConjugationManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Rule table
    // -------------------------------------------------------------------------

    /// Adds a rule, assigning it a fresh id.
    ///
    /// A rule without an index goes after every other rule of its part of
    /// speech.
    pub fn add_rule(&mut self, mut rule: ConjugationRule) -> RuleId {
        self.next_rule += 1;
        let id = RuleId(self.next_rule);
        rule.id = id;
        if rule.index.is_none() {
            let last = self
                .rules
                .values()
                .filter(|r| r.pos == rule.pos)
                .filter_map(|r| r.index)
                .max()
                .unwrap_or(0);
            rule.index = Some(last + 1);
        }
        trace!(rule = %id, pos = %rule.pos, combination = %rule.combination, "rule added");
        self.rules.insert(id, rule);
        id
    }

    /// Removes a rule.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this id.
    pub fn remove_rule(&mut self, id: RuleId) -> Result<ConjugationRule> {
        self.rules.remove(&id).ok_or_else(|| Error::unknown_rule(id))
    }

    /// Removes every rule of `pos` producing `combination`. Returns how many.
    pub fn remove_rules_for(&mut self, pos: PosId, combination: &CombinationId) -> usize {
        self.remove_where(|r| r.pos == pos && r.combination == *combination)
    }

    /// Removes every rule of `pos`. Returns how many.
    pub fn clear_rules(&mut self, pos: PosId) -> usize {
        self.remove_where(|r| r.pos == pos)
    }

    fn remove_where(&mut self, predicate: impl Fn(&ConjugationRule) -> bool) -> usize {
        let doomed: Vec<RuleId> = self
            .rules
            .values()
            .filter(|r| predicate(r))
            .map(|r| r.id)
            .collect();
        for id in &doomed {
            self.rules.remove(id);
        }
        doomed.len()
    }

    /// Gets a rule by id.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&ConjugationRule> {
        self.rules.get(&id)
    }

    /// Gets a mutable reference to a rule.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this id.
    pub fn rule_mut(&mut self, id: RuleId) -> Result<&mut ConjugationRule> {
        self.rules.get_mut(&id).ok_or_else(|| Error::unknown_rule(id))
    }

    /// Iterates over every rule in id order.
    pub fn rules(&self) -> impl Iterator<Item = &ConjugationRule> {
        self.rules.values()
    }

    /// Number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules of `pos`, in application order.
    #[must_use]
    pub fn rules_for_pos(&self, pos: PosId) -> Vec<&ConjugationRule> {
        let mut rules: Vec<_> = self.rules.values().filter(|r| r.pos == pos).collect();
        rules.sort_by_key(|r| r.order_key());
        rules
    }

    /// Rules of `pos` producing `combination`, in application order.
    #[must_use]
    pub fn rules_for(&self, pos: PosId, combination: &CombinationId) -> Vec<&ConjugationRule> {
        let mut rules: Vec<_> = self
            .rules
            .values()
            .filter(|r| r.pos == pos && r.combination == *combination)
            .collect();
        rules.sort_by_key(|r| r.order_key());
        rules
    }

    /// Renumbers the rules of `pos` 1..n, preserving application order.
    pub fn normalize_indices(&mut self, pos: PosId) {
        let order: Vec<RuleId> = self.rules_for_pos(pos).iter().map(|r| r.id).collect();
        for (index, id) in (1..).zip(order) {
            if let Some(rule) = self.rules.get_mut(&id) {
                rule.index = Some(index);
            }
        }
    }

    /// Moves a rule one place earlier among the rules of its combination.
    ///
    /// Returns false if it was already first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this id.
    pub fn move_rule_up(&mut self, id: RuleId) -> Result<bool> {
        self.move_rule(id, true)
    }

    /// Moves a rule one place later among the rules of its combination.
    ///
    /// Returns false if it was already last.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this id.
    pub fn move_rule_down(&mut self, id: RuleId) -> Result<bool> {
        self.move_rule(id, false)
    }

    fn move_rule(&mut self, id: RuleId, up: bool) -> Result<bool> {
        let (pos, combination) = {
            let rule = self.rule(id).ok_or_else(|| Error::unknown_rule(id))?;
            (rule.pos, rule.combination.clone())
        };
        self.normalize_indices(pos);

        let siblings: Vec<(RuleId, Option<u32>)> = self
            .rules_for(pos, &combination)
            .iter()
            .map(|r| (r.id, r.index))
            .collect();
        let Some(at) = siblings.iter().position(|(sibling, _)| *sibling == id) else {
            return Ok(false);
        };
        let other = if up {
            at.checked_sub(1)
        } else {
            Some(at + 1).filter(|next| *next < siblings.len())
        };
        let Some(other) = other else {
            return Ok(false);
        };

        let (other_id, other_index) = siblings[other];
        let own_index = siblings[at].1;
        self.rule_mut(id)?.index = other_index;
        self.rule_mut(other_id)?.index = own_index;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Paradigms and suppression
    // -------------------------------------------------------------------------

    /// Sets the paradigm of `pos`.
    pub fn set_paradigm(&mut self, pos: PosId, paradigm: Paradigm) {
        self.paradigms.insert(pos, paradigm);
    }

    /// The paradigm of `pos`, if one was set.
    #[must_use]
    pub fn paradigm(&self, pos: PosId) -> Option<&Paradigm> {
        self.paradigms.get(&pos)
    }

    /// Every combination of `pos`. Empty if it has no paradigm.
    #[must_use]
    pub fn combinations(&self, pos: PosId) -> Vec<Combination> {
        self.paradigm(pos).map(Paradigm::combinations).unwrap_or_default()
    }

    /// Label of a combination of `pos`.
    #[must_use]
    pub fn combination_label(&self, pos: PosId, combination: &CombinationId) -> Option<String> {
        self.paradigm(pos)?.label(combination)
    }

    /// Suppresses (or restores) a combination of `pos`.
    pub fn set_suppressed(&mut self, pos: PosId, combination: CombinationId, suppressed: bool) {
        if suppressed {
            self.suppressed.insert((pos, combination));
        } else {
            self.suppressed.remove(&(pos, combination));
        }
    }

    /// Returns true if the combination is suppressed for `pos`.
    #[must_use]
    pub fn is_suppressed(&self, pos: PosId, combination: &CombinationId) -> bool {
        self.suppressed.contains(&(pos, combination.clone()))
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Derives `combination` of `base` with the default configuration.
    #[must_use]
    pub fn derive_form(&self, base: &WordForm, pos: PosId, combination: &CombinationId) -> Derivation {
        self.derive_form_with(base, pos, combination, &EngineConfig::default())
    }

    /// Derives `combination` of `base`.
    ///
    /// Rules run in ascending index order, ties in insertion order. Each
    /// rule is gated against the base form, not the working string. When no
    /// rule runs, the base value is returned with `applied == false`.
    #[must_use]
    pub fn derive_form_with(
        &self,
        base: &WordForm,
        pos: PosId,
        combination: &CombinationId,
        config: &EngineConfig,
    ) -> Derivation {
        let mut derivation = Derivation::unchanged(base.value.clone());

        if self.is_suppressed(pos, combination) {
            debug!(%pos, %combination, "combination suppressed");
            derivation.value.clear();
            derivation.suppressed = true;
            return derivation;
        }

        for rule in self.rules_for(pos, combination) {
            let outcome = match rule.gate(base) {
                Ok(outcome) => outcome,
                Err(error) => {
                    debug!(rule = %rule.id, %error, "malformed rule filter");
                    derivation.faults.push(rule_fault(rule, error));
                    RuleOutcome::MalformedFilter
                }
            };

            let mut steps = Vec::new();
            if outcome == RuleOutcome::Applied {
                derivation.applied = true;
                for step in &rule.steps {
                    let before = derivation.value.clone();
                    let malformed = match step.apply(&before) {
                        Ok(after) => {
                            derivation.value = after;
                            false
                        }
                        Err(error) => {
                            debug!(rule = %rule.id, %error, "malformed transform step");
                            derivation.faults.push(rule_fault(rule, error));
                            true
                        }
                    };
                    if config.record_traces {
                        steps.push(StepTrace {
                            step: step.to_string(),
                            before,
                            after: derivation.value.clone(),
                            malformed,
                        });
                    }
                }
            } else {
                trace!(rule = %rule.id, ?outcome, "rule skipped");
            }

            if config.record_traces {
                derivation.trace.push(RuleTrace {
                    rule: rule.id,
                    name: rule.name.clone(),
                    outcome,
                    steps,
                });
            }
        }

        derivation
    }

    /// Derives every combination of the paradigm of `pos`.
    #[must_use]
    pub fn derive_paradigm(
        &self,
        base: &WordForm,
        pos: PosId,
        config: &EngineConfig,
    ) -> Vec<(Combination, Derivation)> {
        self.combinations(pos)
            .into_iter()
            .map(|combination| {
                let derivation = self.derive_form_with(base, pos, &combination.id, config);
                (combination, derivation)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Maintenance
    // -------------------------------------------------------------------------

    /// Rules of `pos` whose combination is no longer a cell of its paradigm.
    #[must_use]
    pub fn orphaned_rules(&self, pos: PosId) -> Vec<&ConjugationRule> {
        let paradigm = self.paradigm(pos);
        self.rules_for_pos(pos)
            .into_iter()
            .filter(|r| !paradigm.is_some_and(|p| p.contains(&r.combination)))
            .collect()
    }

    fn combinations_selecting(
        &self,
        pos: PosId,
        declension_index: usize,
        dimension: DimensionId,
    ) -> Vec<CombinationId> {
        self.combinations(pos)
            .into_iter()
            .map(|c| c.id)
            .filter(|id| id.dimension_at(declension_index) == Some(dimension))
            .collect()
    }

    /// Copies `rules` onto every combination of `pos` that selects
    /// `dimension` for the dimensional declension at `declension_index`,
    /// except `except`. Copies go after the existing rules.
    pub fn copy_rules_to_dimension(
        &mut self,
        pos: PosId,
        declension_index: usize,
        dimension: DimensionId,
        rules: &[ConjugationRule],
        except: &CombinationId,
    ) -> Vec<RuleId> {
        let targets = self.combinations_selecting(pos, declension_index, dimension);
        let mut added = Vec::new();
        for target in targets.into_iter().filter(|t| t != except) {
            for rule in rules {
                let mut copy = rule.clone();
                copy.pos = pos;
                copy.combination = target.clone();
                copy.index = None;
                added.push(self.add_rule(copy));
            }
        }
        debug!(%pos, copied = added.len(), "rules copied to dimension");
        added
    }

    /// Removes rules equal in content to any of `like` from every combination
    /// of `pos` selecting `dimension` at `declension_index`. Returns how many.
    pub fn remove_matching_rules(
        &mut self,
        pos: PosId,
        declension_index: usize,
        dimension: DimensionId,
        like: &[ConjugationRule],
    ) -> usize {
        self.remove_where(|r| {
            r.pos == pos
                && r.combination.dimension_at(declension_index) == Some(dimension)
                && like.iter().any(|l| r.same_content(l))
        })
    }

    /// Literal find/replace inside the pattern and replacement of every step,
    /// optionally limited to one part of speech.
    ///
    /// A step whose pattern would become blank is reverted and reported with
    /// an error. Unchanged steps are not reported.
    pub fn evolve_rules(&mut self, pos: Option<PosId>, find: &str, replace: &str) -> Vec<Evolution> {
        let mut evolutions = Vec::new();
        if find.is_empty() {
            return evolutions;
        }

        let ids: Vec<RuleId> = self
            .rules
            .values()
            .filter(|r| pos.is_none_or(|p| r.pos == p))
            .map(|r| r.id)
            .collect();
        for id in ids {
            let Some(rule) = self.rules.get_mut(&id) else {
                continue;
            };
            for step in &mut rule.steps {
                let before = format!("{}->{}", step.regex(), step.replacement());
                let regex = step.regex().replace(find, replace);
                let replacement = step.replacement().replace(find, replace);
                let after = format!("{regex}->{replacement}");

                if regex.trim().is_empty() {
                    evolutions.push(Evolution {
                        subject: rule.name.clone(),
                        before,
                        after,
                        error: Some("pattern blanked (value reverted to original)".into()),
                    });
                } else if regex != step.regex() || replacement != step.replacement() {
                    step.set(regex, replacement);
                    evolutions.push(Evolution {
                        subject: rule.name.clone(),
                        before,
                        after,
                        error: None,
                    });
                }
            }
        }
        debug!(changes = evolutions.len(), "rules evolved");
        evolutions
    }

    /// Stored forms of `word` whose combination is not a cell of its
    /// paradigm.
    #[must_use]
    pub fn deprecated_forms<'w>(&self, word: &'w Word) -> Vec<(&'w CombinationId, &'w str)> {
        let paradigm = word.pos.and_then(|pos| self.paradigm(pos));
        word.stored_forms
            .iter()
            .filter(|(combination, _)| !paradigm.is_some_and(|p| p.contains(combination)))
            .map(|(combination, form)| (combination, form.as_str()))
            .collect()
    }
}

fn rule_fault(rule: &ConjugationRule, error: Error) -> Error {
    let name = if rule.name.is_empty() {
        rule.id.to_string()
    } else {
        format!("{} ({})", rule.name, rule.id)
    };
    error.with_context(
        ErrorContext::new()
            .with_source(name)
            .with_frame(format!("{} {}", rule.pos, rule.combination)),
    )
}
