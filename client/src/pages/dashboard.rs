//! Marketing dashboard: headline statistics and platform budgets.
//!
//! The figures are static; the period tabs are local view state only.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::stat_card::{StatCard, Statistic, Trend};

pub const STATISTICS: [Statistic; 4] = [
    Statistic { name: "Total Spend", value: "$8,765", previous: "$10,234", progress: "-14.32%", trend: Trend::Down },
    Statistic { name: "Visitor", value: "14,321", previous: "12,543", progress: "+14.23%", trend: Trend::Up },
    Statistic { name: "Acquisition", value: "1,023", previous: "876", progress: "+16.73%", trend: Trend::Up },
    Statistic { name: "Revenue", value: "$18,765", previous: "$16,432", progress: "+21.67%", trend: Trend::Up },
];

/// Reporting window selected by the tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Days7,
    Days14,
    Days30,
}

impl Period {
    pub const ALL: [Self; 3] = [Self::Days7, Self::Days14, Self::Days30];

    pub fn days(self) -> u32 {
        match self {
            Self::Days7 => 7,
            Self::Days14 => 14,
            Self::Days30 => 30,
        }
    }

    pub fn label(self) -> String {
        format!("{} Days", self.days())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformBudget {
    pub name: &'static str,
    pub remaining: &'static str,
    pub percentage: u8,
}

pub const BUDGETS: [PlatformBudget; 5] = [
    PlatformBudget { name: "facebook", remaining: "$12,345", percentage: 60 },
    PlatformBudget { name: "twitter", remaining: "$15,432", percentage: 86 },
    PlatformBudget { name: "google", remaining: "$5,678", percentage: 67 },
    PlatformBudget { name: "tiktok", remaining: "$3,456", percentage: 21 },
    PlatformBudget { name: "bing", remaining: "$2,098", percentage: 35 },
];

/// Inline width for a progress bar, capped at 100%.
pub fn bar_width(percentage: u8) -> String {
    format!("width: {}%", percentage.min(100))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let period = RwSignal::new(Period::default());

    view! {
        <div class="dashboard">
            <div class="dashboard__header">
                <h1>"Marketing"</h1>
                <div class="tabs" role="tablist">
                    {Period::ALL
                        .iter()
                        .map(|p| {
                            let p = *p;
                            view! {
                                <button
                                    type="button"
                                    role="tab"
                                    class="tabs__trigger"
                                    class:tabs__trigger--active=move || period.get() == p
                                    on:click=move |_| period.set(p)
                                >
                                    {p.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="dashboard__stats">
                {STATISTICS.iter().map(|stat| view! { <StatCard stat=*stat/> }).collect_view()}
            </div>
            <div class="card dashboard__budgets">
                <h5>"Budget by Platform"</h5>
                {BUDGETS
                    .iter()
                    .map(|budget| {
                        view! {
                            <div class="budget">
                                <div class="budget__row">
                                    <p>{format!("{} \u{b7} Remaining {}", budget.name, budget.remaining)}</p>
                                    <p>{format!("{}%", budget.percentage)}</p>
                                </div>
                                <div class="progress">
                                    <div class="progress__bar" style=bar_width(budget.percentage)></div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
