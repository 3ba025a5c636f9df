//! BitSet: a fixed universe of bits packed into words.
//!
//! Storage is caller-supplied — an inline `[usize; W]`, or any
//! `AsRef<[usize]> + AsMut<[usize]>` buffer such as a `&mut [usize]`
//! carved from an arena — and its word count fixes the universe at
//! `words * usize::BITS` indices. Set/clear/test are O(1); union and
//! intersection run whole words at a time; iteration yields set indices
//! in strictly ascending order.

const WORD_BITS: usize = usize::BITS as usize;

/// Bit set over word storage `S`. The universe never grows.
#[derive(Clone, Copy)]
pub struct BitSet<S>(S);

impl<S> BitSet<S> {
    /// Wrap an existing buffer as-is; bits already set in it are treated
    /// as members.
    pub fn with_storage(storage: S) -> Self {
        BitSet(storage)
    }

    /// Recover the backing storage.
    pub fn into_storage(self) -> S {
        self.0
    }
}

impl<const W: usize> BitSet<[usize; W]> {
    /// Create an empty set over `W * usize::BITS` indices.
    pub fn new() -> Self {
        BitSet([0; W])
    }
}

impl<const W: usize> Default for BitSet<[usize; W]> {
    fn default() -> Self {
        Self::new()
    }
}

fn split(index: usize) -> (usize, usize) {
    (index / WORD_BITS, index % WORD_BITS)
}

impl<S: AsRef<[usize]> + AsMut<[usize]>> BitSet<S> {
    /// Number of indices in the universe.
    pub fn capacity(&self) -> usize {
        self.0.as_ref().len() * WORD_BITS
    }

    /// Set bit `index`; `true` if it was not already set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = split(index);
        let slot = &mut self.0.as_mut()[word];
        let old = *slot & (1 << bit) != 0;
        *slot |= 1 << bit;
        !old
    }

    /// Clear bit `index`; `true` if it was set. Indices beyond the
    /// universe are never set, so they report `false`.
    pub fn remove(&mut self, index: usize) -> bool {
        let (word, bit) = split(index);
        match self.0.as_mut().get_mut(word) {
            Some(slot) => {
                let old = *slot & (1 << bit) != 0;
                *slot &= !(1 << bit);
                old
            }
            None => false,
        }
    }

    /// Test bit `index`. Indices beyond the universe report `false`.
    pub fn contains(&self, index: usize) -> bool {
        let (word, bit) = split(index);
        match self.0.as_ref().get(word) {
            Some(&w) => w & (1 << bit) != 0,
            None => false,
        }
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        for w in self.0.as_mut() {
            *w = 0;
        }
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.0.as_ref().iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_ref().iter().all(|&w| w == 0)
    }

    /// In-place union, a word at a time. Bits of `other` beyond this
    /// set's universe are ignored.
    pub fn union_with<S2: AsRef<[usize]>>(&mut self, other: &BitSet<S2>) {
        for (w, o) in self.0.as_mut().iter_mut().zip(other.0.as_ref()) {
            *w |= o;
        }
    }

    /// In-place intersection, a word at a time. Words beyond `other`'s
    /// universe intersect with nothing and are cleared.
    pub fn intersect_with<S2: AsRef<[usize]>>(&mut self, other: &BitSet<S2>) {
        let words = self.0.as_mut();
        let other = other.0.as_ref();
        for (i, w) in words.iter_mut().enumerate() {
            match other.get(i) {
                Some(o) => *w &= o,
                None => *w = 0,
            }
        }
    }

    /// Iterate set indices in strictly ascending order. Lazy and
    /// restartable: each call starts a fresh pass.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: self.0.as_ref(),
            next_word: 0,
            current: 0,
        }
    }
}

impl<S: AsRef<[usize]> + AsMut<[usize]>> core::fmt::Debug for BitSet<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Ascending iterator over set bit indices.
pub struct Iter<'a> {
    words: &'a [usize],
    /// Index of the next word to load.
    next_word: usize,
    /// Unvisited bits of the word before `next_word`.
    current: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                // Clear the lowest set bit.
                self.current &= self.current - 1;
                return Some((self.next_word - 1) * WORD_BITS + bit);
            }
            self.current = *self.words.get(self.next_word)?;
            self.next_word += 1;
        }
    }
}
