/*!
 * Memory Types
 * Blocks, placement strategies, and reporting views for the arena
 */

use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Contiguous-memory placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// First adequate free block in offset order
    FirstFit,
    /// Smallest adequate free block
    BestFit,
    /// Largest adequate free block
    WorstFit,
    /// First adequate free block at or after the previous placement
    NextFit,
}

impl PlacementStrategy {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "first-fit" | "firstfit" | "first_fit" => Ok(Self::FirstFit),
            "best-fit" | "bestfit" | "best_fit" => Ok(Self::BestFit),
            "worst-fit" | "worstfit" | "worst_fit" => Ok(Self::WorstFit),
            "next-fit" | "nextfit" | "next_fit" => Ok(Self::NextFit),
            _ => Err(format!(
                "Invalid strategy '{}'. Valid: first-fit, best-fit, worst-fit, next-fit",
                s
            )),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstFit => "first-fit",
            Self::BestFit => "best-fit",
            Self::WorstFit => "worst-fit",
            Self::NextFit => "next-fit",
        }
    }
}

impl std::fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlacementStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlacementStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One contiguous region of the arena, free or allocated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub offset: Address,
    pub size: Size,
    pub owner: Option<Pid>,
}

impl Block {
    /// Create a free block
    pub fn free(offset: Address, size: Size) -> Self {
        Self {
            offset,
            size,
            owner: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }
}

/// Reporting view of a block.
///
/// Identifiers are dense in offset order and recomputed after every
/// structural change; they must never be cached across arena mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub id: usize,
    pub offset: Address,
    pub size: Size,
    pub free: bool,
    pub owner: Option<Pid>,
}

/// A single allocation request from the workload
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRequest {
    pub pid: Pid,
    pub size: Size,
    /// Block id assigned by the allocation pass; `None` = unsatisfied
    pub block: Option<usize>,
}

impl MemoryRequest {
    pub fn new(pid: Pid, size: Size) -> Self {
        Self {
            pid,
            size,
            block: None,
        }
    }
}

/// Arena occupancy statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArenaStats {
    pub total: Size,
    pub used: Size,
    pub free: Size,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free: Size,
}
