use std::collections::HashMap;

use crate::models::analytics::{PortfolioSummary, TypeAllocation};
use crate::models::investment::{Investment, InvestmentType};

/// Portfolio valuation: a pure function over the investment collection.
///
/// Reads current prices, mutates nothing — safe to call repeatedly and
/// concurrently with other reads.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full valuation read-model: totals, gain/loss, best and
    /// worst performer, per-type allocation, and diversification score.
    pub fn portfolio_summary(&self, investments: &[Investment]) -> PortfolioSummary {
        let total_value: f64 = investments.iter().map(Investment::total_value).sum();
        let total_cost: f64 = investments.iter().map(Investment::total_cost).sum();
        let total_gain_loss = total_value - total_cost;
        let total_gain_loss_pct = if total_cost > 0.0 {
            total_gain_loss / total_cost * 100.0
        } else {
            0.0
        };

        let best_performer = investments
            .iter()
            .max_by(|a, b| {
                a.gain_loss_percentage()
                    .partial_cmp(&b.gain_loss_percentage())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned();
        let worst_performer = investments
            .iter()
            .min_by(|a, b| {
                a.gain_loss_percentage()
                    .partial_cmp(&b.gain_loss_percentage())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned();

        let mut by_type: HashMap<InvestmentType, f64> = HashMap::new();
        for investment in investments {
            *by_type.entry(investment.kind).or_insert(0.0) += investment.total_value();
        }
        let distinct_kinds = by_type.len();

        let mut type_breakdown: Vec<TypeAllocation> = by_type
            .into_iter()
            .map(|(kind, value)| TypeAllocation { kind, value })
            .collect();
        // Largest allocation first; kind order breaks ties deterministically
        type_breakdown.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.kind.cmp(&b.kind))
        });

        let diversification_score =
            distinct_kinds as f64 / InvestmentType::ALL.len() as f64 * 100.0;

        PortfolioSummary {
            total_value,
            total_cost,
            total_gain_loss,
            total_gain_loss_pct,
            best_performer,
            worst_performer,
            type_breakdown,
            diversification_score,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
