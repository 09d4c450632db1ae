//! Rule-chain triage classifier.
//!
//! Classification is a short-circuit walk over an ordered rule list: the
//! first matching rule decides the outcome, with no scoring or aggregation.
//! Keyword sets, thresholds, rule order and labels all live in the policy
//! value, so deployments that disagree on thresholds are just different
//! policy files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::models::{Severity, TriageOutcome, Vitals};

/// Temperature value injected by a failed sensor.
pub const SENSOR_FAULT_TEMP: f64 = 0.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagePolicy {
    pub rules: Vec<TriageRule>,
    pub fallback: RuleOutcome,
    /// When set, a temperature of exactly 0.0 keeps its chain-derived
    /// severity but the outcome is marked and the disposition warns that the
    /// sensor should be checked. Off by default: the reference deployments
    /// silently classify a fault as a healthy low reading.
    #[serde(default)]
    pub flag_sensor_fault: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRule {
    pub when: RuleCondition,
    pub then: RuleOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub severity: Severity,
    pub disposition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleCondition {
    /// Case-insensitive substring containment over the raw complaint text.
    /// No tokenization or negation handling: "sem dor no peito" still
    /// matches "peito".
    ComplaintContainsAny(Vec<String>),
    /// True if any single check passes (OR semantics).
    AnyVital(Vec<VitalCheck>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalCheck {
    pub vital: VitalSign,
    pub op: Comparison,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalSign {
    Temperature,
    OxygenSaturation,
    HeartRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl VitalCheck {
    fn passes(&self, vitals: &Vitals) -> bool {
        let value = match self.vital {
            VitalSign::Temperature => vitals.temperature_celsius,
            VitalSign::OxygenSaturation => f64::from(vitals.oxygen_saturation),
            VitalSign::HeartRate => f64::from(vitals.heart_rate),
        };
        match self.op {
            Comparison::Ge => value >= self.threshold,
            Comparison::Gt => value > self.threshold,
            Comparison::Lt => value < self.threshold,
            Comparison::Le => value <= self.threshold,
        }
    }
}

impl RuleCondition {
    fn matches(&self, complaint: &str, vitals: &Vitals) -> bool {
        match self {
            RuleCondition::ComplaintContainsAny(keywords) => {
                let text = complaint.to_lowercase();
                keywords.iter().any(|kw| text.contains(kw.as_str()))
            }
            RuleCondition::AnyVital(checks) => checks.iter().any(|c| c.passes(vitals)),
        }
    }
}

impl TriagePolicy {
    /// Classify one submission. Pure: no side effects, always returns
    /// exactly one outcome. An empty complaint matches no keyword rule and
    /// falls through to the vitals thresholds; a sensor-fault temperature of
    /// 0.0 triggers no high-temperature rule and is processed like any low
    /// reading unless `flag_sensor_fault` is set.
    pub fn classify(&self, complaint: &str, vitals: &Vitals) -> TriageOutcome {
        let outcome = self
            .rules
            .iter()
            .find(|rule| rule.when.matches(complaint, vitals))
            .map(|rule| &rule.then)
            .unwrap_or(&self.fallback);

        let sensor_fault =
            self.flag_sensor_fault && vitals.temperature_celsius == SENSOR_FAULT_TEMP;
        let disposition = if sensor_fault {
            format!("{} [verificar sensor de temperatura]", outcome.disposition)
        } else {
            outcome.disposition.clone()
        };
        debug!(severity = %outcome.severity, sensor_fault, "triage rule chain resolved");

        TriageOutcome {
            severity: outcome.severity,
            disposition,
            sensor_fault,
        }
    }

    /// Load a policy from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read policy file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid policy file {}", path.display()))
    }

    /// The complete reference policy: critical-complaint keywords first,
    /// then two threshold tiers, then the non-urgent fallback.
    pub fn full() -> Self {
        Self {
            rules: vec![
                TriageRule {
                    when: RuleCondition::ComplaintContainsAny(vec![
                        "peito".into(),
                        "respirar".into(),
                        "falta de ar".into(),
                        "desmaio".into(),
                    ]),
                    then: RuleOutcome {
                        severity: Severity::Red,
                        disposition: "Emergência: encaminhar imediatamente ao atendimento".into(),
                    },
                },
                TriageRule {
                    when: RuleCondition::AnyVital(vec![
                        VitalCheck {
                            vital: VitalSign::Temperature,
                            op: Comparison::Ge,
                            threshold: 39.0,
                        },
                        VitalCheck {
                            vital: VitalSign::OxygenSaturation,
                            op: Comparison::Lt,
                            threshold: 90.0,
                        },
                    ]),
                    then: RuleOutcome {
                        severity: Severity::Orange,
                        disposition: "Alta prioridade: avaliação médica urgente".into(),
                    },
                },
                TriageRule {
                    when: RuleCondition::AnyVital(vec![
                        VitalCheck {
                            vital: VitalSign::Temperature,
                            op: Comparison::Ge,
                            threshold: 37.8,
                        },
                        VitalCheck {
                            vital: VitalSign::HeartRate,
                            op: Comparison::Gt,
                            threshold: 110.0,
                        },
                    ]),
                    then: RuleOutcome {
                        severity: Severity::Yellow,
                        disposition: "Prioridade: aguardar chamada preferencial".into(),
                    },
                },
            ],
            fallback: RuleOutcome {
                severity: Severity::Green,
                disposition: "Não urgente: aguardar atendimento por ordem de chegada".into(),
            },
            flag_sensor_fault: false,
        }
    }

    /// The reduced two-threshold variant some kiosks shipped with.
    pub fn simplified() -> Self {
        Self {
            rules: vec![
                TriageRule {
                    when: RuleCondition::AnyVital(vec![
                        VitalCheck {
                            vital: VitalSign::Temperature,
                            op: Comparison::Gt,
                            threshold: 39.0,
                        },
                        VitalCheck {
                            vital: VitalSign::OxygenSaturation,
                            op: Comparison::Lt,
                            threshold: 90.0,
                        },
                    ]),
                    then: RuleOutcome {
                        severity: Severity::Red,
                        disposition: "Emergência: encaminhar imediatamente ao atendimento".into(),
                    },
                },
                TriageRule {
                    when: RuleCondition::AnyVital(vec![VitalCheck {
                        vital: VitalSign::Temperature,
                        op: Comparison::Gt,
                        threshold: 37.5,
                    }]),
                    then: RuleOutcome {
                        severity: Severity::Yellow,
                        disposition: "Prioridade: aguardar chamada preferencial".into(),
                    },
                },
            ],
            fallback: RuleOutcome {
                severity: Severity::Green,
                disposition: "Não urgente: aguardar atendimento por ordem de chegada".into(),
            },
            flag_sensor_fault: false,
        }
    }
}

impl Default for TriagePolicy {
    fn default() -> Self {
        Self::full()
    }
}
