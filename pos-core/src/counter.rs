//! # Contadores e Tabelas de Probabilidade
//!
//! Estruturas de contagem usadas pelo treinamento dos pontuadores:
//!
//! - [`Counter`]: mapa `chave → peso`. Uma chave ausente vale **0.0**.
//! - [`CounterMap`]: mapa `histórico → Counter`, para distribuições condicionais
//!   como $P(tag \mid tag_{anterior})$.
//!
//! A semântica "ausente = 0" serve apenas para contagens. A treliça **não**
//! usa esta convenção: lá uma aresta ausente é ilegal (ver [`crate::trellis`]).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Contador de pesos em ponto flutuante.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    counts: HashMap<K, f64>,
}

impl<K: Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Peso de uma chave; 0.0 se ela nunca foi vista.
    pub fn count<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0.0)
    }

    /// Peso explícito de uma chave, distinguindo "ausente" de "zero".
    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    pub fn increment(&mut self, key: K, amount: f64) {
        *self.counts.entry(key).or_insert(0.0) += amount;
    }

    pub fn set(&mut self, key: K, value: f64) {
        self.counts.insert(key, value);
    }

    /// Soma de todos os pesos.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Divide todos os pesos pelo total, transformando contagens em distribuição.
    ///
    /// Um contador vazio (ou de total zero) permanece inalterado.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total == 0.0 {
            return;
        }
        for value in self.counts.values_mut() {
            *value /= total;
        }
    }

    /// Chave de maior peso. Em empate, vence a primeira encontrada na iteração.
    pub fn argmax(&self) -> Option<&K> {
        let mut best: Option<(&K, f64)> = None;
        for (key, &value) in &self.counts {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((key, value)),
            }
        }
        best.map(|(key, _)| key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<(K, f64)> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Mapa de contadores condicionados a um histórico.
#[derive(Debug, Clone)]
pub struct CounterMap<K, V> {
    counters: HashMap<K, Counter<V>>,
}

impl<K: Eq + Hash, V: Eq + Hash> CounterMap<K, V> {
    pub fn new() -> Self {
        Self {
            counters: HashMap::new(),
        }
    }

    /// Contagem do par `(key, value)`; 0.0 se ausente.
    pub fn count<Q, R>(&self, key: &Q, value: &R) -> f64
    where
        K: Borrow<Q>,
        V: Borrow<R>,
        Q: Eq + Hash + ?Sized,
        R: Eq + Hash + ?Sized,
    {
        self.counters
            .get(key)
            .map(|counter| counter.count(value))
            .unwrap_or(0.0)
    }

    pub fn increment(&mut self, key: K, value: V, amount: f64) {
        self.counters.entry(key).or_default().increment(value, amount);
    }

    pub fn set(&mut self, key: K, value: V, amount: f64) {
        self.counters.entry(key).or_default().set(value, amount);
    }

    /// Contador associado a um histórico, se existir.
    pub fn counter<Q>(&self, key: &Q) -> Option<&Counter<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counters.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counters.contains_key(key)
    }

    /// Soma das contagens de um histórico (o denominador de $P(v \mid k)$).
    pub fn row_total<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counters.get(key).map(Counter::total).unwrap_or(0.0)
    }

    /// Normaliza cada linha separadamente: $P(v \mid k) = c(k, v) / c(k, \cdot)$.
    pub fn conditional_normalize(&mut self) {
        for counter in self.counters.values_mut() {
            counter.normalize();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Counter<V>)> {
        self.counters.iter()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Default for CounterMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_counts_as_zero() {
        let mut counter = Counter::new();
        counter.increment("a", 2.0);
        assert_eq!(counter.count(&"a"), 2.0);
        assert_eq!(counter.count(&"b"), 0.0);
        assert_eq!(counter.get(&"b"), None);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut counter = Counter::new();
        counter.increment("a", 1.0);
        counter.increment("b", 3.0);
        counter.normalize();
        assert!((counter.count(&"b") - 0.75).abs() < 1e-12);
        assert!((counter.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_argmax() {
        let counter: Counter<&str> = [("a", -3.0), ("b", -0.5), ("c", f64::NEG_INFINITY)]
            .into_iter()
            .collect();
        assert_eq!(counter.argmax(), Some(&"b"));
        assert_eq!(Counter::<&str>::new().argmax(), None);
    }

    #[test]
    fn test_argmax_all_neg_infinity_still_picks_a_key() {
        let counter: Counter<&str> = [("a", f64::NEG_INFINITY)].into_iter().collect();
        assert_eq!(counter.argmax(), Some(&"a"));
    }

    #[test]
    fn test_conditional_normalize() {
        let mut map = CounterMap::new();
        map.increment("DT", "NN", 3.0);
        map.increment("DT", "JJ", 1.0);
        map.increment("NN", "VB", 5.0);
        assert_eq!(map.row_total(&"DT"), 4.0);
        map.conditional_normalize();
        assert!((map.count(&"DT", &"NN") - 0.75).abs() < 1e-12);
        assert!((map.count(&"NN", &"VB") - 1.0).abs() < 1e-12);
        assert_eq!(map.count(&"VB", &"NN"), 0.0);
    }

    #[test]
    fn test_clone_then_normalize_leaves_raw_counts() {
        let mut raw = CounterMap::new();
        raw.increment("run".to_string(), 2u32, 1.0);
        raw.increment("run".to_string(), 3u32, 3.0);
        let mut normalized = raw.clone();
        normalized.conditional_normalize();
        assert_eq!(raw.count("run", &3u32), 3.0);
        assert!((normalized.count("run", &3u32) - 0.75).abs() < 1e-12);

        let unknown: Counter<u32> = [(2, 1.0), (3, 1.0)].into_iter().collect();
        let mut copy = unknown.clone();
        copy.normalize();
        assert_eq!(unknown.total(), 2.0);
        assert!(format!("{copy:?}").contains("0.5"));
    }
}
