//! Marketing statistic card.

use leptos::prelude::*;

/// Direction of change against the previous period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "trend--up",
            Self::Down => "trend--down",
        }
    }
}

/// One card's figures, preformatted for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistic {
    pub name: &'static str,
    pub value: &'static str,
    pub previous: &'static str,
    pub progress: &'static str,
    pub trend: Trend,
}

#[component]
pub fn StatCard(stat: Statistic) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <p class="stat-card__name">{stat.name}</p>
            <h5 class="stat-card__value">{stat.value}</h5>
            <div class="stat-card__footer">
                <div class="stat-card__previous">
                    <span>"Previous"</span>
                    <span class="strong">{stat.previous}</span>
                </div>
                <div class="stat-card__progress">
                    <span>"Progress"</span>
                    <span class=format!("strong {}", stat.trend.css_class())>{stat.progress}</span>
                </div>
            </div>
        </div>
    }
}
