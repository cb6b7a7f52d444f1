use std::fmt;

use itertools::Itertools;

use schema_utilities::TagIndex;

use crate::NodeIndex;

/// A zero sized tag for the block.
pub struct BlockTag {}

/// The index for blocks.
pub type BlockIndex = TagIndex<usize, BlockTag>;

/// A trait for partitions of the nodes `0..len` that expose the block number
/// for every node.
///
/// The invariants are that the union of all blocks is the original set, and
/// that each block contains distinct elements
pub trait Partition {
    /// Returns the block number for the given node.
    fn block_number(&self, node: NodeIndex) -> BlockIndex;

    /// Returns the number of blocks in the partition.
    fn num_of_blocks(&self) -> usize;

    /// Returns the number of elements in the partition.
    fn len(&self) -> usize;

    /// Returns whether the partition is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A partition that stores the block number of every node explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct IndexedPartition {
    partition: Vec<BlockIndex>,
    num_of_blocks: usize,
}

impl IndexedPartition {
    /// Creates a partition of `len` nodes with all nodes in one block.
    pub fn new(len: usize) -> IndexedPartition {
        IndexedPartition {
            partition: vec![BlockIndex::new(0); len],
            num_of_blocks: if len > 0 { 1 } else { 0 },
        }
    }

    /// Creates a partition from the block number of every node. The block
    /// numbers must be dense, i.e. every number below the maximum is used.
    pub fn from_blocks(partition: Vec<BlockIndex>) -> IndexedPartition {
        let num_of_blocks = partition.iter().map(|block| **block + 1).max().unwrap_or(0);

        debug_assert!(
            (0..num_of_blocks).all(|block| partition.contains(&BlockIndex::new(block))),
            "Block numbers {partition:?} are not dense"
        );

        IndexedPartition {
            partition,
            num_of_blocks,
        }
    }

    /// Iterate over the nodes in the given block, in increasing order.
    pub fn iter_block(&self, block: BlockIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.partition
            .iter()
            .enumerate()
            .filter(move |(_, other)| **other == block)
            .map(|(node, _)| NodeIndex::new(node))
    }

    /// Returns the members of every block, in increasing order.
    pub fn blocks(&self) -> Vec<Vec<NodeIndex>> {
        let mut blocks = vec![Vec::new(); self.num_of_blocks];
        for (node, block) in self.partition.iter().enumerate() {
            blocks[**block].push(NodeIndex::new(node));
        }

        blocks
    }

    /// Returns the same partition where the blocks are numbered in the order
    /// of their smallest node.
    pub fn normalise(&self) -> IndexedPartition {
        let mut renumbering: Vec<Option<BlockIndex>> = vec![None; self.num_of_blocks];
        let mut num_of_blocks = 0;

        let partition = self
            .partition
            .iter()
            .map(|block| {
                *renumbering[**block].get_or_insert_with(|| {
                    num_of_blocks += 1;
                    BlockIndex::new(num_of_blocks - 1)
                })
            })
            .collect();

        IndexedPartition {
            partition,
            num_of_blocks,
        }
    }

    /// Returns the partition in which two nodes share a block iff their
    /// blocks in this partition share a block in `coarser`. The nodes of
    /// `coarser` are the blocks of this partition.
    pub fn compose(&self, coarser: &impl Partition) -> IndexedPartition {
        debug_assert_eq!(coarser.len(), self.num_of_blocks);

        IndexedPartition {
            partition: self
                .partition
                .iter()
                .map(|block| coarser.block_number(NodeIndex::new(**block)))
                .collect(),
            num_of_blocks: coarser.num_of_blocks(),
        }
    }
}

impl Partition for IndexedPartition {
    fn block_number(&self, node: NodeIndex) -> BlockIndex {
        self.partition[*node]
    }

    fn num_of_blocks(&self) -> usize {
        self.num_of_blocks
    }

    fn len(&self) -> usize {
        self.partition.len()
    }
}

impl fmt::Debug for IndexedPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = self.blocks();
        write!(
            f,
            "{{{}}}",
            blocks
                .iter()
                .format_with(", ", |block, f| f(&format_args!("{{{}}}", block.iter().format(", "))))
        )
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn partition(blocks: &[usize]) -> IndexedPartition {
        IndexedPartition::from_blocks(blocks.iter().copied().map(BlockIndex::new).collect())
    }

    #[test]
    fn test_normalise_partition() {
        let normalised = partition(&[2, 0, 2, 1]).normalise();

        assert_eq!(normalised, partition(&[0, 1, 0, 2]));
        assert_eq!(format!("{normalised:?}"), "{{0, 2}, {1}, {3}}");
    }

    #[test]
    fn test_compose_partition() {
        // Four nodes in three blocks, of which the first and last are merged.
        let finer = partition(&[0, 1, 1, 2]);
        let coarser = partition(&[0, 1, 0]);

        let composed = finer.compose(&coarser);
        assert_eq!(composed.num_of_blocks(), 2);
        assert_eq!(composed.iter_block(BlockIndex::new(0)).collect::<Vec<_>>(), vec![
            NodeIndex::new(0),
            NodeIndex::new(3)
        ]);
    }

    #[test]
    fn test_empty_partition() {
        let empty = IndexedPartition::new(0);
        assert!(empty.is_empty());
        assert_eq!(empty.num_of_blocks(), 0);
        assert!(empty.blocks().is_empty());
    }
}
