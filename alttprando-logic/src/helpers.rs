use crate::ItemCollection;
use alttprando_game::{Item, Tier};

fn best_tier(items: &ItemCollection, fixed: &[Item], progressive: Item) -> Tier {
    let fixed_tier = fixed
        .iter()
        .filter(|&&item| items.has(item))
        .filter_map(|&item| item.def().tier)
        .max()
        .unwrap_or(0);
    let progressive_tier = Tier::try_from(items.count(progressive)).unwrap_or(Tier::MAX);
    Tier::max(fixed_tier, progressive_tier)
}

pub fn sword_level(items: &ItemCollection) -> Tier {
    best_tier(
        items,
        &[Item::L1Sword, Item::MasterSword, Item::L3Sword, Item::L4Sword],
        Item::ProgressiveSword,
    )
}

pub fn glove_level(items: &ItemCollection) -> Tier {
    best_tier(
        items,
        &[Item::PowerGlove, Item::TitansMitt],
        Item::ProgressiveGlove,
    )
}
