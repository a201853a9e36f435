//! Cosmetic floor variety
//!
//! Purely visual: decorations never change the structural grid.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::DecorationConfig;
use crate::world::{FloorDecor, Grid};

/// Pick a decoration for one floor cell
pub fn roll(rng: &mut StdRng, config: &DecorationConfig) -> FloorDecor {
    let draw: u8 = rng.gen_range(0..=100);
    if draw > config.rare_above {
        FloorDecor::Rare
    } else if draw > config.uncommon_above {
        FloorDecor::Uncommon(rng.gen_range(1..=config.uncommon_variants))
    } else {
        FloorDecor::Plain
    }
}

/// Decoration for every cell, row-major; walls get `None`
pub fn decorate(rng: &mut StdRng, grid: &Grid, config: &DecorationConfig) -> Vec<Option<FloorDecor>> {
    grid.cells
        .iter()
        .map(|cell| cell.is_floor().then(|| roll(rng, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Cell;
    use rand::SeedableRng;

    #[test]
    fn test_walls_are_undecorated() {
        let grid = Grid::from_rows(&[
            "###",
            "#.#",
            "###",
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let decor = decorate(&mut rng, &grid, &DecorationConfig::default());
        assert_eq!(decor.iter().filter(|d| d.is_some()).count(), 1);
        assert!(decor[grid.xy_to_idx(1, 1)].is_some());
    }

    #[test]
    fn test_bucket_ranges() {
        let grid = Grid::new(60, 60, Cell::Floor);
        let config = DecorationConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let decor = decorate(&mut rng, &grid, &config);

        let mut plain = 0;
        for d in decor.iter().flatten() {
            match d {
                FloorDecor::Plain => plain += 1,
                FloorDecor::Uncommon(n) => assert!((1..=config.uncommon_variants).contains(n)),
                FloorDecor::Rare => {}
            }
        }
        // Roughly 90% plain
        assert!(plain > 3000, "only {} plain tiles", plain);
    }

    #[test]
    fn test_all_rare_when_threshold_zero() {
        let config = DecorationConfig { rare_above: 0, uncommon_above: 0, uncommon_variants: 1 };
        let mut rng = StdRng::seed_from_u64(5);
        let mut rare = 0;
        for _ in 0..500 {
            match roll(&mut rng, &config) {
                FloorDecor::Rare => rare += 1,
                FloorDecor::Plain => {}
                FloorDecor::Uncommon(_) => panic!("uncommon bucket is empty"),
            }
        }
        // Only a draw of exactly 0 stays plain
        assert!(rare > 450);
    }
}
