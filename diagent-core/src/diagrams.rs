//! Catalog of supported diagram types
//!
//! Every entry carries the example template that seeds the system
//! instruction, so the model starts from syntax the renderer accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    /// Let the model pick whatever fits the description
    #[default]
    Auto,
    Sequence,
    Activity,
    Class,
    UseCase,
    EntityRelationship,
    Gantt,
    MindMap,
    Component,
    State,
    Deployment,
    Network,
    WorkBreakdown,
    Object,
    InteractionOverview,
    Timing,
    Wireframe,
    JsonData,
    YamlData,
    Ebnf,
    ArchiMate,
    Salt,
    Maths,
}

impl DiagramType {
    pub const ALL: [DiagramType; 23] = [
        DiagramType::Auto,
        DiagramType::Sequence,
        DiagramType::Activity,
        DiagramType::Class,
        DiagramType::UseCase,
        DiagramType::EntityRelationship,
        DiagramType::Gantt,
        DiagramType::MindMap,
        DiagramType::Component,
        DiagramType::State,
        DiagramType::Deployment,
        DiagramType::Network,
        DiagramType::WorkBreakdown,
        DiagramType::Object,
        DiagramType::InteractionOverview,
        DiagramType::Timing,
        DiagramType::Wireframe,
        DiagramType::JsonData,
        DiagramType::YamlData,
        DiagramType::Ebnf,
        DiagramType::ArchiMate,
        DiagramType::Salt,
        DiagramType::Maths,
    ];

    /// Human-facing label
    pub fn label(self) -> &'static str {
        match self {
            DiagramType::Auto => "Let AI decide best Diagram",
            DiagramType::Sequence => "Sequence Diagram",
            DiagramType::Activity => "Activity Diagram (Flow Chart) - New Syntax",
            DiagramType::Class => "Class Diagram",
            DiagramType::UseCase => "Use Case Diagram",
            DiagramType::EntityRelationship => "Entity Relationship Diagram",
            DiagramType::Gantt => "Gantt Chart",
            DiagramType::MindMap => "MindMap Diagram",
            DiagramType::Component => "Component Diagram",
            DiagramType::State => "State Diagram",
            DiagramType::Deployment => "Deployment Diagram",
            DiagramType::Network => "Network diagram (nwdiag)",
            DiagramType::WorkBreakdown => "Work Breakdown Structure (WBS) Diagram",
            DiagramType::Object => "Object Diagram",
            DiagramType::InteractionOverview => "Interaction Overview Diagram",
            DiagramType::Timing => "Timing Diagram",
            DiagramType::Wireframe => "Wireframe",
            DiagramType::JsonData => "JSON Data",
            DiagramType::YamlData => "YAML Data",
            DiagramType::Ebnf => "EBNF diagram",
            DiagramType::ArchiMate => "ArchiMate Diagram",
            DiagramType::Salt => "Salt (Wireframe)",
            DiagramType::Maths => "Maths",
        }
    }

    /// Stable command-line identifier
    pub fn slug(self) -> &'static str {
        match self {
            DiagramType::Auto => "auto",
            DiagramType::Sequence => "sequence",
            DiagramType::Activity => "activity",
            DiagramType::Class => "class",
            DiagramType::UseCase => "use-case",
            DiagramType::EntityRelationship => "entity-relationship",
            DiagramType::Gantt => "gantt",
            DiagramType::MindMap => "mind-map",
            DiagramType::Component => "component",
            DiagramType::State => "state",
            DiagramType::Deployment => "deployment",
            DiagramType::Network => "network",
            DiagramType::WorkBreakdown => "work-breakdown",
            DiagramType::Object => "object",
            DiagramType::InteractionOverview => "interaction-overview",
            DiagramType::Timing => "timing",
            DiagramType::Wireframe => "wireframe",
            DiagramType::JsonData => "json-data",
            DiagramType::YamlData => "yaml-data",
            DiagramType::Ebnf => "ebnf",
            DiagramType::ArchiMate => "archi-mate",
            DiagramType::Salt => "salt",
            DiagramType::Maths => "maths",
        }
    }

    /// What the diagram is good for, shown by `diagent types`
    pub fn useful_for(self) -> &'static str {
        match self {
            DiagramType::Auto => {
                "Assistant selects the best fit diagram based on the input requirements."
            }
            DiagramType::Sequence => "Dynamic modeling of object interactions.",
            DiagramType::Activity => "Modeling business and software processes.",
            DiagramType::Class => "Software design to show classes and relationships.",
            DiagramType::UseCase => "System analysis to represent user interactions.",
            DiagramType::EntityRelationship => "Database design to show entity relationships.",
            DiagramType::Gantt => "Project management to visualize project schedules.",
            DiagramType::MindMap => "Brainstorming and organizing thoughts.",
            DiagramType::Component => "System architecture to show components and dependencies.",
            DiagramType::State => "Behavioral modeling of state changes.",
            DiagramType::Deployment => "Planning hardware and software deployment.",
            DiagramType::Network => "Designing and visualizing network architectures.",
            DiagramType::WorkBreakdown => {
                "Project management to break down projects into manageable parts."
            }
            DiagramType::Object => "Detailed modeling showing instances and relationships.",
            DiagramType::InteractionOverview => "Overview of complex system interactions.",
            DiagramType::Timing => "Systems engineering to visualize timing constraints.",
            DiagramType::Wireframe => "UI/UX design to layout user interfaces.",
            DiagramType::JsonData => "Data interchange between systems.",
            DiagramType::YamlData => "Configuration files and data serialization.",
            DiagramType::Ebnf => "Specification of computer language syntax.",
            DiagramType::ArchiMate => "Enterprise architecture to describe architectures.",
            DiagramType::Salt => "Advanced wireframing.",
            DiagramType::Maths => "Mathematical modeling and visualization.",
        }
    }

    /// Opening template quoted in the system instruction
    pub fn example(self) -> &'static str {
        match self {
            DiagramType::Auto => "@startuml\n",
            DiagramType::Sequence => "@startuml\nAlice -> Bob: Message\n@enduml",
            DiagramType::Activity => "@startuml\nstart\n:activity;\nstop\n@enduml",
            DiagramType::Class => "@startuml\nClass01 <|-- Class02\n@enduml",
            DiagramType::UseCase => "@startuml\n:User: -- (UseCase)\n@enduml",
            DiagramType::EntityRelationship => "@startuml\n[Entity1] -- [Entity2]\n@enduml",
            DiagramType::Gantt => "@startgantt\n[Task1] lasts 5 days\n@endgantt",
            DiagramType::MindMap => "@startmindmap\n* MindMap\n** Sub-Topic\n@endmindmap",
            DiagramType::Component => "@startuml\n[Component1] ..> [Component2]\n@enduml",
            DiagramType::State => "@startuml\n[*] --> State1\n@enduml",
            DiagramType::Deployment => "@startuml\nnode1 -- node2\n@enduml",
            DiagramType::Network => {
                "@startnwdiag\nnwdiag {\n  network dmz {\n    web01 [address = '192.168.0.1'];\n  }\n}\n@endnwdiag"
            }
            DiagramType::WorkBreakdown => "@startwbs\n* Project\n** Task1\n*** Subtask1\n@endwbs",
            DiagramType::Object => "@startuml\nobject Object1\n@enduml",
            DiagramType::InteractionOverview => {
                "@startuml\n(*) --> if \"Condition\" then\n-->[true] \"Activity1\"\n@enduml"
            }
            DiagramType::Timing => "@startuml\ntiming\n@enduml",
            DiagramType::Wireframe => "@startsalt\n{\nJust a simple wireframe\n}\n@endsalt",
            DiagramType::JsonData => "@startjson\n{\n\"key\": \"value\"\n}\n@endjson",
            DiagramType::YamlData => "@startyaml\nkey: value\n@endyaml",
            DiagramType::Ebnf => "@startebnf\n\"rule\" = 'definition';\n@endebnf",
            DiagramType::ArchiMate => "@startuml\n[Element] ..> [AnotherElement]\n@enduml",
            DiagramType::Salt => "@startsalt\n{\nYour wireframe here\n}\n@endsalt",
            DiagramType::Maths => "@startmath\n\\sum_{i=1}^n i = \\frac{n(n+1)}{2}\n@endmath",
        }
    }

    /// Name used inside the system instruction
    pub fn prompt_name(self) -> &'static str {
        match self {
            DiagramType::Auto => "most appropriate diagram",
            other => other.label(),
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram type '{0}' (run `diagent types` for the list)")]
pub struct UnknownDiagramType(pub String);

impl FromStr for DiagramType {
    type Err = UnknownDiagramType;

    /// Accepts a slug (`use-case`) or a label (`Use Case Diagram`), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DiagramType::ALL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(needle) || kind.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownDiagramType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::extract_markup;
    use std::collections::HashSet;

    #[test]
    fn slugs_and_labels_are_unique() {
        let slugs: HashSet<_> = DiagramType::ALL.iter().map(|d| d.slug()).collect();
        let labels: HashSet<_> = DiagramType::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(slugs.len(), DiagramType::ALL.len());
        assert_eq!(labels.len(), DiagramType::ALL.len());
    }

    #[test]
    fn parses_slug_and_label() {
        assert_eq!("sequence".parse::<DiagramType>(), Ok(DiagramType::Sequence));
        assert_eq!(
            "Sequence Diagram".parse::<DiagramType>(),
            Ok(DiagramType::Sequence)
        );
        assert_eq!("USE-CASE".parse::<DiagramType>(), Ok(DiagramType::UseCase));
        assert!("pie chart".parse::<DiagramType>().is_err());
    }

    #[test]
    fn auto_uses_generic_prompt_name() {
        assert_eq!(DiagramType::Auto.prompt_name(), "most appropriate diagram");
        assert_eq!(DiagramType::Gantt.prompt_name(), "Gantt Chart");
    }

    #[test]
    fn complete_examples_are_extractable() {
        for kind in DiagramType::ALL {
            if kind == DiagramType::Auto {
                continue;
            }
            assert_eq!(
                extract_markup(kind.example()),
                Some(kind.example()),
                "example for {kind} should be a full block"
            );
        }
    }
}
