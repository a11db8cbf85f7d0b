//! PEARLS phases and their registry.
//!
//! The debrief protocol walks a fixed, linear sequence of six phases.
//! Each phase carries the instruction block sent to the completion provider
//! as its system prompt, and the minimum number of messages that must be
//! recorded in it before the session moves on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A phase of the PEARLS debriefing framework.
///
/// Phases flow strictly in order:
/// - `Preparation` → `Engagement` → `Analysis` → `Reflection` → `Learning` → `Summary`
///
/// `Summary` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PearlsPhase {
    /// Setting the stage and establishing psychological safety.
    Preparation,

    /// Eliciting the learner's thoughts and feelings.
    Engagement,

    /// Exploring key events, decisions and performance gaps.
    Analysis,

    /// Promoting self-reflection and alternative approaches.
    Reflection,

    /// Identifying key learning points and links to practice.
    Learning,

    /// Summarizing and setting goals for future practice.
    Summary,
}

impl PearlsPhase {
    /// All phases in protocol order.
    pub fn all() -> [PearlsPhase; 6] {
        [
            Self::Preparation,
            Self::Engagement,
            Self::Analysis,
            Self::Reflection,
            Self::Learning,
            Self::Summary,
        ]
    }

    /// Returns the successor phase, or `None` at the terminal phase.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Preparation => Some(Self::Engagement),
            Self::Engagement => Some(Self::Analysis),
            Self::Analysis => Some(Self::Reflection),
            Self::Reflection => Some(Self::Learning),
            Self::Learning => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// Returns true if no phase follows this one.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Minimum number of messages (user and assistant alike) stamped with
    /// this phase before a transition is considered.
    pub fn min_messages(&self) -> usize {
        match self {
            Self::Preparation => 2,
            Self::Engagement => 3,
            Self::Analysis => 4,
            Self::Reflection => 3,
            Self::Learning => 3,
            Self::Summary => 2,
        }
    }

    /// Single-letter code forming the PEARLS acronym.
    pub fn code(&self) -> char {
        match self {
            Self::Preparation => 'P',
            Self::Engagement => 'E',
            Self::Analysis => 'A',
            Self::Reflection => 'R',
            Self::Learning => 'L',
            Self::Summary => 'S',
        }
    }

    /// Human-readable phase name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preparation => "Preparation",
            Self::Engagement => "Engagement",
            Self::Analysis => "Analysis",
            Self::Reflection => "Reflection",
            Self::Learning => "Learning",
            Self::Summary => "Summary",
        }
    }

    /// Short description of the phase, suitable for UI display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Preparation => {
                "Review learning objectives and set the stage for the debriefing session"
            }
            Self::Engagement => {
                "Encourage active participation and create a safe learning environment"
            }
            Self::Analysis => "Explore key events, decisions and performance gaps",
            Self::Reflection => "Facilitate self-reflection and discussion of actions taken",
            Self::Learning => "Extract key lessons and reinforce important concepts",
            Self::Summary => "Summarize key points and plan for future improvement",
        }
    }

    /// Returns the instruction block used as the system prompt in this phase.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Preparation => PREPARATION_PROMPT,
            Self::Engagement => ENGAGEMENT_PROMPT,
            Self::Analysis => ANALYSIS_PROMPT,
            Self::Reflection => REFLECTION_PROMPT,
            Self::Learning => LEARNING_PROMPT,
            Self::Summary => SUMMARY_PROMPT,
        }
    }
}

impl Default for PearlsPhase {
    fn default() -> Self {
        Self::Preparation
    }
}

impl fmt::Display for PearlsPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PREPARATION_PROMPT: &str = "\
You are in the Preparation phase of the PEARLS debriefing model.
Focus on:
1. Setting the stage for learning
2. Establishing psychological safety
3. Clarifying learning objectives
4. Reviewing the simulation scenario

Ask questions that help the learner prepare for the debriefing process.";

const ENGAGEMENT_PROMPT: &str = "\
You are in the Engagement phase of the PEARLS debriefing model.
Focus on:
1. Creating a safe learning environment
2. Using advocacy-inquiry approach
3. Encouraging open dialogue
4. Understanding the learner's perspective

Ask questions that help the learner express their thoughts and feelings about the simulation.";

const ANALYSIS_PROMPT: &str = "\
You are in the Analysis phase of the PEARLS debriefing model.
Focus on:
1. Exploring key events and decisions
2. Identifying performance gaps
3. Discussing team dynamics
4. Analyzing communication patterns

Ask questions that help the learner analyze their performance and decision-making process.";

const REFLECTION_PROMPT: &str = "\
You are in the Reflection phase of the PEARLS debriefing model.
Focus on:
1. Promoting self-reflection
2. Exploring alternative approaches
3. Identifying strengths and areas for improvement
4. Encouraging metacognition

Ask questions that help the learner reflect on their experience and learning.";

const LEARNING_PROMPT: &str = "\
You are in the Learning phase of the PEARLS debriefing model.
Focus on:
1. Identifying key learning points
2. Connecting to clinical practice
3. Discussing evidence-based practices
4. Planning for future improvement

Ask questions that help the learner identify and articulate their key learnings.";

const SUMMARY_PROMPT: &str = "\
You are in the Summary phase of the PEARLS debriefing model.
Focus on:
1. Summarizing key points
2. Reinforcing positive behaviors
3. Providing constructive feedback
4. Setting goals for future practice

Help the learner summarize their experience and plan for future improvement.";
