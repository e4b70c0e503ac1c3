use crate::models::period::{ChannelData, ChannelMap, PeriodData};
use crate::models::totals::QtdValor;

/// Sum quantity and value over a set of channels.
pub fn sum_channels<'a, I>(channels: I) -> QtdValor
where
    I: IntoIterator<Item = &'a ChannelData>,
{
    channels
        .into_iter()
        .map(|ch| QtdValor::new(ch.quantity, ch.total_value))
        .sum()
}

/// Totals of a period whose revenue is "sum of all its sales channels",
/// including the channels of its sub-tabs.
pub fn period_totals(period: &PeriodData) -> QtdValor {
    sum_channels(period.all_channels().map(|(_, _, ch)| ch))
}

/// Sum of the given channel ids only; absent channels count as zero.
pub fn named_channels(channels: &ChannelMap, ids: &[&str]) -> QtdValor {
    sum_channels(ids.iter().filter_map(|id| channels.get(*id)))
}
