//! Flattening of releases into a single list of assets, newest first.

use super::entity::{Asset, ReleaseWithAssets};

/// Flattens every asset of every release into one list, sorted by `updated_at` descending.
///
/// The sort is stable, assets updated at the same instant keep the upstream order.
pub fn flatten(releases: Vec<ReleaseWithAssets>) -> Vec<Asset> {
    let mut assets: Vec<Asset> = releases
        .into_iter()
        .flat_map(|release| release.assets)
        .collect();
    sort_by_recency(&mut assets);
    assets
}

pub fn sort_by_recency(assets: &mut [Asset]) {
    assets.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
}
