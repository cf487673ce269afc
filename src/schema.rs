use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum FlowDirection {
    #[schemars(
        description = "Revenue-like flow: value travels from the leaf record through its category into the hub (left side of the diagram)"
    )]
    Inflow,

    #[schemars(
        description = "Expense-like flow: value travels from the hub through the category out to the leaf record (right side of the diagram)"
    )]
    Outflow,
}

impl Default for FlowDirection {
    fn default() -> Self {
        Self::Inflow
    }
}

impl FlowDirection {
    /// Resolves the direction from the two signals the source data carries:
    /// a negative amount, or the expense keyword in the record name. This
    /// runs once at ingestion; the tag is authoritative from then on.
    pub fn from_signals(amount: f64, name: &str, expense_keyword: &str) -> Self {
        if amount < 0.0 || name.contains(expense_keyword) {
            Self::Outflow
        } else {
            Self::Inflow
        }
    }

    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Outflow)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FiscalRecord {
    #[schemars(
        description = "The line item label as it appears in the financial statements (e.g. 'Tuition and fees', 'Instruction Expenses')"
    )]
    pub name: String,

    #[schemars(
        description = "The category label this record is grouped under (e.g. 'Operating revenues')"
    )]
    pub category: String,

    #[schemars(
        description = "The signed amount for the fiscal year. The sign is consumed by the direction tag; edge weights use the magnitude only."
    )]
    pub amount: f64,

    #[schemars(
        description = "Which way this record flows relative to the hub. Computed once at ingestion, never re-derived from text."
    )]
    pub direction: FlowDirection,
}

impl FiscalRecord {
    pub fn resolve(name: &str, category: &str, amount: f64, expense_keyword: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            amount,
            direction: FlowDirection::from_signals(amount, name, expense_keyword),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BidirectionalCategory {
    #[schemars(
        description = "The category label as it appears on input records (e.g. 'Nonoperating revenues')"
    )]
    pub base_label: String,

    #[schemars(
        description = "The combined label the base category is renamed to so both signs share one grouping node (e.g. 'Nonoperating revenues (expenses)')"
    )]
    pub combined_label: String,

    #[schemars(
        description = "The sign-flipped counterpart node that absorbs outflow members of the combined category, preventing them from cancelling against inflow peers (e.g. 'Nonoperating expenses (revenues)')"
    )]
    pub overflow_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlowGraphConfig {
    #[schemars(
        description = "Label of the central hub node all category flows route through (e.g. the organization name)"
    )]
    pub hub_label: String,

    #[serde(default = "default_expense_keyword")]
    #[schemars(
        description = "Case-sensitive substring that marks a record name or category label as expense-like. Defaults to 'Expense'."
    )]
    pub expense_keyword: String,

    #[serde(default)]
    #[schemars(
        description = "Policy table of categories whose members may flow in either direction. Each entry declares the rename and the overflow counterpart; new bidirectional categories are configuration, not code."
    )]
    pub bidirectional: Vec<BidirectionalCategory>,
}

fn default_expense_keyword() -> String {
    "Expense".to_string()
}

impl FlowGraphConfig {
    pub fn new(hub_label: &str) -> Self {
        Self {
            hub_label: hub_label.to_string(),
            expense_keyword: default_expense_keyword(),
            bidirectional: Vec::new(),
        }
    }

    /// Applies the renaming rule: a base category with a declared
    /// sign-flipped counterpart is rewritten to its combined label.
    pub fn rename_category<'a>(&'a self, category: &'a str) -> &'a str {
        self.bidirectional
            .iter()
            .find(|entry| entry.base_label == category)
            .map(|entry| entry.combined_label.as_str())
            .unwrap_or(category)
    }

    /// The overflow counterpart for a combined label, if the label belongs
    /// to a declared bidirectional category.
    pub fn overflow_for_combined(&self, label: &str) -> Option<&str> {
        self.bidirectional
            .iter()
            .find(|entry| entry.combined_label == label)
            .map(|entry| entry.overflow_label.as_str())
    }

    /// Classifies a category label. Combined and overflow labels count as
    /// outflow regardless of keyword, since the case-sensitive keyword
    /// match would miss both (e.g. "expenses" vs "Expense").
    pub fn classify_label(&self, label: &str) -> FlowDirection {
        if label.contains(&self.expense_keyword) {
            return FlowDirection::Outflow;
        }
        for entry in &self.bidirectional {
            if label == entry.combined_label || label == entry.overflow_label {
                return FlowDirection::Outflow;
            }
        }
        FlowDirection::Inflow
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FlowGraphConfig)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
