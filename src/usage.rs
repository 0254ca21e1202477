//! Account usage within the current billing period.

use serde::{Deserialize, Serialize};

/// Usage ratio from which a row is flagged as approaching its limit.
pub const WARNING_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDetail {
    pub count: u64,
    pub limit: u64,
}

impl UsageDetail {
    pub const fn new(count: u64, limit: u64) -> Self {
        Self { count, limit }
    }

    /// Units left before the limit; negative once the limit is exceeded.
    pub const fn remaining(&self) -> i64 {
        self.limit as i64 - self.count as i64
    }

    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.count as f64 / self.limit as f64 * 100.0
        }
    }

    pub const fn limit_reached(&self) -> bool {
        self.limit > 0 && self.count >= self.limit
    }

    pub fn level(&self) -> UsageLevel {
        let percentage = self.percentage();
        if percentage >= 100.0 {
            UsageLevel::Exceeded
        } else if percentage >= WARNING_THRESHOLD * 100.0 {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub label: &'static str,
    pub detail: UsageDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub character: UsageDetail,
    pub document: Option<UsageDetail>,
    pub team_document: Option<UsageDetail>,
}

impl Usage {
    pub fn any_limit_reached(&self) -> bool {
        self.details().any(|(_, detail)| detail.limit_reached())
    }

    /// Table rows: one per reported usage kind, then a total row when any
    /// limit is configured.
    pub fn rows(&self) -> Vec<UsageRow> {
        let mut rows: Vec<UsageRow> = self
            .details()
            .map(|(label, detail)| UsageRow { label, detail })
            .collect();

        let total = rows.iter().fold(UsageDetail::new(0, 0), |acc, row| {
            UsageDetail::new(acc.count + row.detail.count, acc.limit + row.detail.limit)
        });

        if total.limit > 0 {
            rows.push(UsageRow {
                label: "Total",
                detail: total,
            });
        }

        rows
    }

    fn details(&self) -> impl Iterator<Item = (&'static str, UsageDetail)> {
        [
            Some(("Translated Characters", self.character)),
            self.document.map(|d| ("Translated Documents", d)),
            self.team_document.map(|d| ("Translated Team Documents", d)),
        ]
        .into_iter()
        .flatten()
    }
}
