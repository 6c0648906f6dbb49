use glam::Vec3;

use crate::model::MeshId;

/// A coin lying on the track. Goes from active to collected once and never back.
#[derive(Debug, Clone)]
pub struct Coin {
    pub position: Vec3,
    pub radius: f32,
    pub mesh: Option<MeshId>,
    collected: bool,
}

impl Coin {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            mesh: None,
            collected: false,
        }
    }

    pub fn with_mesh(mut self, mesh: MeshId) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as collected. Returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// All coins of a run, kept in spawn order
#[derive(Debug, Clone, Default)]
pub struct CoinField {
    coins: Vec<Coin>,
}

impl CoinField {
    pub fn new() -> Self {
        Self { coins: Vec::new() }
    }

    pub fn push(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Coin> {
        self.coins.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.is_collected())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn collected_count(&self) -> usize {
        self.coins.len() - self.active_count()
    }
}

impl FromIterator<Coin> for CoinField {
    fn from_iter<T: IntoIterator<Item = Coin>>(iter: T) -> Self {
        Self {
            coins: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_collects_exactly_once() {
        let mut coin = Coin::new(Vec3::ZERO, 0.5);
        assert!(!coin.is_collected());
        assert!(coin.collect());
        assert!(coin.is_collected());
        assert!(!coin.collect());
        assert!(coin.is_collected());
    }

    #[test]
    fn field_counts_follow_collection() {
        let mut field: CoinField = (0..4)
            .map(|i| Coin::new(Vec3::new(0.0, 0.5, -(i as f32) * 10.0), 0.5))
            .collect();
        assert_eq!(field.len(), 4);
        assert_eq!(field.active_count(), 4);

        field.iter_mut().nth(2).unwrap().collect();
        assert_eq!(field.active_count(), 3);
        assert_eq!(field.collected_count(), 1);
        assert!(field.active().all(|c| c.position.z != -20.0));
    }
}
