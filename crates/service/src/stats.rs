//! Dashboard statistics.
//!
//! These are fixed sample figures for the admin and manager dashboards;
//! nothing here reads the sheet store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_properties: u32,
    pub total_tenants: u32,
    pub total_managers: u32,
    pub monthly_revenue: u64,
    pub occupancy_rate: f32,
    pub revenue_trend: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPoint {
    pub week: String,
    pub tickets: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    pub assigned_properties: u32,
    pub open_tickets: u32,
    pub resolved_tickets: u32,
    pub pending_payments: u32,
    pub weekly_trend: Vec<WeeklyPoint>,
}

pub fn admin_stats() -> AdminStats {
    let trend = [("Jan", 38_500), ("Feb", 41_200), ("Mar", 39_800), ("Apr", 44_100), ("May", 47_600)];
    AdminStats {
        total_properties: 24,
        total_tenants: 186,
        total_managers: 6,
        monthly_revenue: 47_600,
        occupancy_rate: 92.5,
        revenue_trend: trend
            .into_iter()
            .map(|(month, revenue)| RevenuePoint { month: month.into(), revenue })
            .collect(),
    }
}

pub fn manager_stats() -> ManagerStats {
    let trend = [("Week 1", 7), ("Week 2", 4), ("Week 3", 9), ("Week 4", 5), ("Week 5", 3)];
    ManagerStats {
        assigned_properties: 5,
        open_tickets: 12,
        resolved_tickets: 38,
        pending_payments: 4,
        weekly_trend: trend
            .into_iter()
            .map(|(week, tickets)| WeeklyPoint { week: week.into(), tickets })
            .collect(),
    }
}
