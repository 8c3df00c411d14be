use chia_protocol::Coin;

/// Streaming coin selection that keeps the fewest, largest coins needed to
/// reach a target amount.
///
/// Coins are kept in descending order of amount. After each insertion the
/// smallest coins are evicted for as long as the rest still reach the target,
/// so the retained set is always the minimal prefix of the largest coins seen.
#[derive(Debug, Clone)]
pub struct CoinPairSearch {
    target: u128,
    total: u128,
    coins: Vec<Coin>,
}

impl CoinPairSearch {
    pub fn new(target: u64) -> Self {
        Self {
            target: target.into(),
            total: 0,
            coins: Vec::new(),
        }
    }

    pub fn process_coin(&mut self, coin: Coin) {
        self.total += u128::from(coin.amount);

        let index = self
            .coins
            .iter()
            .position(|existing| existing.amount < coin.amount)
            .unwrap_or(self.coins.len());
        self.coins.insert(index, coin);

        while let Some(last) = self.coins.last() {
            let remaining = self.total - u128::from(last.amount);

            // Never empty the set, even when the target is zero.
            if remaining < self.target || (remaining == 0 && self.coins.len() == 1) {
                break;
            }

            self.total = remaining;
            self.coins.pop();
        }
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn is_satisfied(&self) -> bool {
        !self.coins.is_empty() && self.total >= self.target
    }

    pub fn result(self) -> (Vec<Coin>, u128) {
        (self.coins, self.total)
    }
}

impl Extend<Coin> for CoinPairSearch {
    fn extend<I: IntoIterator<Item = Coin>>(&mut self, coins: I) {
        for coin in coins {
            self.process_coin(coin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chia_protocol::Bytes32;

    fn coin(parent: u8, amount: u64) -> Coin {
        Coin::new(Bytes32::new([parent; 32]), Bytes32::default(), amount)
    }

    fn search(target: u64, amounts: &[u64]) -> (Vec<u64>, u128) {
        let mut search = CoinPairSearch::new(target);
        search.extend(
            amounts
                .iter()
                .enumerate()
                .map(|(i, &amount)| coin(i as u8, amount)),
        );
        let (coins, total) = search.result();
        (coins.iter().map(|coin| coin.amount).collect(), total)
    }

    #[test]
    fn test_minimal_selection() {
        assert_eq!(search(250, &[100, 100, 100]), (vec![100, 100, 100], 300));
        assert_eq!(search(150, &[100, 100, 100]), (vec![100, 100], 200));
        assert_eq!(search(100, &[100, 100, 100]), (vec![100], 100));
    }

    #[test]
    fn test_prefers_largest_coins() {
        assert_eq!(search(60, &[10, 50, 30, 40]), (vec![50, 40], 90));
        assert_eq!(search(5, &[1, 2, 3, 7]), (vec![7], 7));
        assert_eq!(search(45, &[20, 20, 30, 5]), (vec![30, 20], 50));
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(search(0, &[]), (vec![], 0));
        assert_eq!(search(0, &[0]), (vec![0], 0));
        assert_eq!(search(0, &[0, 0, 0]), (vec![0], 0));
        assert_eq!(search(0, &[5]), (vec![5], 5));
    }

    #[test]
    fn test_insufficient() {
        let mut search = CoinPairSearch::new(1000);
        search.extend([coin(0, 100), coin(1, 200)]);
        assert!(!search.is_satisfied());
        assert_eq!(search.total(), 300);
        assert_eq!(search.result().0.len(), 2);
    }

    #[test]
    fn test_large_totals() {
        let mut search = CoinPairSearch::new(u64::MAX);
        search.extend([coin(0, u64::MAX), coin(1, u64::MAX)]);
        assert!(search.is_satisfied());
        assert_eq!(search.result(), (vec![coin(0, u64::MAX)], u128::from(u64::MAX)));
    }
}
