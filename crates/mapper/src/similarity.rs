//! Ratcliff/Obershelp similarity ("gestalt pattern matching").
//!
//! Scores are computed over `char` sequences so that every caller, on every
//! platform, gets bit-identical ratios for the same pair of names. The
//! matcher indexes the second sequence (`b`) once and can then be compared
//! against many first sequences (`a`) cheaply, which is how `best_match`
//! scores one source name against a whole target list.

use rustc_hash::FxHashMap;

/// Sequences at least this long get the "popular element" pruning.
const AUTOJUNK_MIN_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Matching blocks
// ---------------------------------------------------------------------------

/// A run of equal elements: `a[a..a+size] == b[b..b+size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl Block {
    fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each element of `b`, ascending. Popular elements removed.
    b2j: FxHashMap<char, Vec<usize>>,
    /// Element counts of `b`, built lazily by `quick_ratio`.
    full_b_count: Option<FxHashMap<char, usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let mut matcher = Self {
            a: a.chars().collect(),
            b: Vec::new(),
            b2j: FxHashMap::default(),
            full_b_count: None,
        };
        matcher.set_seq2(b);
        matcher
    }

    /// Replace `a`, keeping the index built over `b`.
    pub fn set_seq1(&mut self, a: &str) {
        self.a.clear();
        self.a.extend(a.chars());
    }

    /// Replace `b` and rebuild its index.
    pub fn set_seq2(&mut self, b: &str) {
        self.b = b.chars().collect();
        self.full_b_count = None;
        self.chain_b();
    }

    fn chain_b(&mut self) {
        let mut b2j: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (j, &ch) in self.b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }

        let n = self.b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let threshold = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        self.b2j = b2j;
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among blocks of maximal size, returns the one starting earliest in `a`,
    /// and of those the one starting earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (a, b) = (&self.a, &self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the longest block ending with a[i-1] and b[j]
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for i in alo..ahi {
            let mut new_j2len: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j == 0 { 0 } else { j2len.get(&(j - 1)).copied().unwrap_or(0) };
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements are absent from b2j; grow the block over them.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Block::new(best_i, best_j, best_size)
    }

    /// All matching blocks, ascending, adjacent runs collapsed, followed by
    /// the `(len_a, len_b, 0)` sentinel.
    pub fn matching_blocks(&self) -> Vec<Block> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0usize, la, 0usize, lb)];
        let mut found = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            found.push(block);
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
        }
        found.sort_by_key(|blk| (blk.a, blk.b, blk.size));

        let mut collapsed: Vec<Block> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match collapsed.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => collapsed.push(block),
            }
        }
        collapsed.push(Block::new(la, lb, 0));
        collapsed
    }

    /// Similarity in `[0, 1]`: `2 * matches / (len_a + len_b)`.
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.matching_blocks().iter().map(|blk| blk.size).sum();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on `ratio()` from element multisets alone.
    pub fn quick_ratio(&mut self) -> f64 {
        let full_b_count = self.full_b_count.get_or_insert_with(|| {
            let mut counts: FxHashMap<char, usize> = FxHashMap::default();
            for &ch in &self.b {
                *counts.entry(ch).or_insert(0) += 1;
            }
            counts
        });

        let mut avail: FxHashMap<char, usize> = FxHashMap::default();
        let mut matches = 0usize;
        for &ch in &self.a {
            let remaining = avail
                .entry(ch)
                .or_insert_with(|| full_b_count.get(&ch).copied().unwrap_or(0));
            if *remaining > 0 {
                *remaining -= 1;
                matches += 1;
            }
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on `ratio()` from lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

/// Similarity of `word` to `candidate`. Note the ratio is not symmetric in
/// general; `candidate` is the first sequence, as in `best_match`.
pub fn similarity(candidate: &str, word: &str) -> f64 {
    SequenceMatcher::new(candidate, word).ratio()
}

/// Best-scoring candidate for `word` with a score of at least `cutoff`.
///
/// Returns the candidate's index and score. Ties go to the candidate that
/// appears first in `candidates`.
pub fn best_match<S: AsRef<str>>(word: &str, candidates: &[S], cutoff: f64) -> Option<(usize, f64)> {
    let mut matcher = SequenceMatcher::new("", word);
    let mut best: Option<(usize, f64)> = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        matcher.set_seq1(candidate.as_ref());
        if matcher.real_quick_ratio() < cutoff || matcher.quick_ratio() < cutoff {
            continue;
        }
        let score = matcher.ratio();
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best
}
