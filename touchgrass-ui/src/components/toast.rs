//! Toast Notifications
//!
//! Stacked notices in the bottom corner. Settled stakes get their own card:
//! green with the payout when the grass was touched, grey with the lost stake
//! when it wasn't.

use leptos::*;

use crate::api::types::StakeResult;
use crate::state::global::GlobalState;

#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2 max-w-sm">
            {move || state.settlement.get().map(|result| {
                let (variant, message) = settlement_notice(&result);
                view! { <Notice variant=variant message=message /> }
            })}
            {move || state.success.get().map(|message| view! {
                <Notice variant=NoticeVariant::Success message=message />
            })}
            {move || state.error.get().map(|message| view! {
                <Notice variant=NoticeVariant::Error message=message />
            })}
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeVariant {
    Success,
    Error,
    Payout,
    Loss,
}

impl NoticeVariant {
    fn icon(self) -> &'static str {
        match self {
            NoticeVariant::Success => "✓",
            NoticeVariant::Error => "✕",
            NoticeVariant::Payout => "🌱",
            NoticeVariant::Loss => "🏙️",
        }
    }

    fn classes(self) -> &'static str {
        match self {
            NoticeVariant::Success => "bg-green-600",
            NoticeVariant::Error => "bg-red-600",
            NoticeVariant::Payout => "bg-emerald-700 border border-emerald-400",
            NoticeVariant::Loss => "bg-gray-700 border border-gray-500",
        }
    }
}

fn settlement_notice(result: &StakeResult) -> (NoticeVariant, String) {
    if result.success {
        let bonus = result.payout - result.stake;
        (
            NoticeVariant::Payout,
            format!("Grass touched! +{:.2} SOL ({:.2} bonus)", result.payout, bonus),
        )
    } else {
        (
            NoticeVariant::Loss,
            format!("Stayed inside. {:.2} SOL stake lost", result.stake),
        )
    }
}

#[component]
fn Notice(#[prop(into)] message: String, variant: NoticeVariant) -> impl IntoView {
    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
            variant.classes()
        )>
            <span class="text-lg">{variant.icon()}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_notice() {
        let won = StakeResult { success: true, stake: 10.0, payout: 12.0 };
        let (variant, message) = settlement_notice(&won);
        assert_eq!(variant, NoticeVariant::Payout);
        assert_eq!(message, "Grass touched! +12.00 SOL (2.00 bonus)");

        let lost = StakeResult { success: false, stake: 10.0, payout: 0.0 };
        let (variant, message) = settlement_notice(&lost);
        assert_eq!(variant, NoticeVariant::Loss);
        assert_eq!(message, "Stayed inside. 10.00 SOL stake lost");
    }
}
