//! Duplicate chains
//!
//! One [`VertexReference`] per original vertex heads a singly linked list of
//! the duplicates created for that vertex. Records live in a flat arena and
//! link by arena index, so a chain is walked without pointers or lifetimes.

/// Arena record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct VertexReference {
    /// Vertex this record stands for; None until the first corner claims it
    pub vertex: Option<u32>,
    /// Arena index of the next duplicate
    pub next: Option<usize>,
}

/// Result of a chain lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainLookup {
    /// Head record not yet assigned
    Unassigned,
    /// A record whose vertex satisfies the predicate
    Found(u32),
    /// No record matched; `tail` is the arena index to link after
    Missing { tail: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct VertexChains {
    refs: Vec<VertexReference>,
    longest: usize,
}

impl VertexChains {
    /// Allocates one unassigned head per original vertex.
    pub fn new(original_count: usize) -> Self {
        Self {
            refs: vec![VertexReference::default(); original_count],
            longest: 1,
        }
    }

    /// Marks the head of `original` as standing for `original` itself.
    pub fn assign(&mut self, original: u32) {
        self.refs[original as usize].vertex = Some(original);
    }

    /// Walks the chain of `original` looking for a vertex accepted by
    /// `matches`.
    pub fn find(&self, original: u32, mut matches: impl FnMut(u32) -> bool) -> ChainLookup {
        let mut cursor = original as usize;
        if self.refs[cursor].vertex.is_none() {
            return ChainLookup::Unassigned;
        }
        loop {
            let record = self.refs[cursor];
            if let Some(vertex) = record.vertex
                && matches(vertex)
            {
                return ChainLookup::Found(vertex);
            }
            match record.next {
                Some(next) => cursor = next,
                None => return ChainLookup::Missing { tail: cursor },
            }
        }
    }

    /// Appends a record for `vertex` and links it after `tail`.
    pub fn append(&mut self, tail: usize, vertex: u32) {
        let index = self.refs.len();
        self.refs.push(VertexReference {
            vertex: Some(vertex),
            next: None,
        });
        self.refs[tail].next = Some(index);
    }

    /// Number of records reachable from the head of `original`.
    pub fn chain_len(&self, original: u32) -> usize {
        let mut len = 0;
        let mut cursor = Some(original as usize);
        while let Some(index) = cursor {
            len += 1;
            cursor = self.refs[index].next;
        }
        len
    }

    /// Records the chain length of `original` if it is the longest so far.
    pub fn note_growth(&mut self, original: u32) {
        self.longest = self.longest.max(self.chain_len(original));
    }

    pub fn longest(&self) -> usize {
        self.longest
    }
}
