//! Vectors over a distribution and the plan that moves data between them.
//!
//! A global vector holds this rank's interval of the flat global
//! numbering; a local vector holds the full ghosted box, dummies
//! included. `ScatterPlan` drives the three movements built on the index
//! plans: forward (global to local), reverse (local to global), and
//! local-to-local ghost refresh.
//!
//! Index lists cross ranks once, at plan construction. Applications move
//! only values: every rank posts all of its sends before taking any
//! receive, and peers are visited in rank order on both sides, so the
//! exchange is deterministic and cannot deadlock on buffered channels.

use crate::comm::Communicator;
use crate::distribution::StagDistribution;
use crate::error::{Result, StagError};
use crate::types::GridInt;

/// This rank's slice of a global vector, block size `entries_per_element`.
#[derive(Clone, Debug)]
pub struct GlobalVector {
  pub values: Vec<f64>,
  block_size: GridInt,
}

impl GlobalVector {
  pub fn block_size(&self) -> GridInt {
    self.block_size
  }
}

/// The ghosted local vector, block size `entries_per_element`. Slots whose
/// local->global map entry is -1 are dummies with undefined content.
#[derive(Clone, Debug)]
pub struct LocalVector {
  pub values: Vec<f64>,
  block_size: GridInt,
}

impl LocalVector {
  pub fn block_size(&self) -> GridInt {
    self.block_size
  }
}

/// Zero-filled global vector sized for the distribution.
pub fn create_global_vector(dist: &StagDistribution) -> GlobalVector {
  GlobalVector {
    values: vec![0.0; dist.entries() as usize],
    block_size: dist.entries_per_element().max(1),
  }
}

/// Zero-filled local vector sized for the distribution.
pub fn create_local_vector(dist: &StagDistribution) -> LocalVector {
  LocalVector {
    values: vec![0.0; dist.entries_ghost() as usize],
    block_size: dist.entries_per_element().max(1),
  }
}

/// A communication plan binding the index plans of one distribution to a
/// communicator.
pub struct ScatterPlan {
  rank: usize,
  size: usize,
  /// (local slot, owned-interval position) pairs served without
  /// communication.
  self_pairs: Vec<(usize, usize)>,
  /// Per peer: owned-interval positions this rank reads from that peer,
  /// and the local slots they land in. Index lists were exchanged at
  /// construction, so peers hold the mirror image in `serves`.
  needs: Vec<Vec<GridInt>>,
  need_slots: Vec<Vec<usize>>,
  /// Per peer: owned-interval positions of this rank that the peer reads.
  serves: Vec<Vec<GridInt>>,
  /// Whether reverse scatters run through the injective owned plan.
  injective_reverse: bool,
  /// (local slot, owned-interval position) pairs of the injective plan.
  injective_pairs: Vec<(usize, usize)>,
}

impl ScatterPlan {
  /// Build the plan and exchange index lists with every peer.
  pub fn new(dist: &StagDistribution, comm: &dyn Communicator) -> Result<Self> {
    let rank = comm.rank();
    let size = comm.size();
    if size != dist.comm_size() || rank != dist.rank() {
      return Err(StagError::ArgOutOfRange(format!(
        "communicator ({} of {}) does not match the distribution ({} of {})",
        rank,
        size,
        dist.rank(),
        dist.comm_size()
      )));
    }
    let offsets = dist.global_offsets();
    let my_offset = offsets[rank];

    let mut self_pairs = Vec::new();
    let mut needs = vec![Vec::new(); size];
    let mut need_slots = vec![Vec::new(); size];
    let gtol = dist.global_to_local();
    for (l, g) in gtol.local.iter().zip(&gtol.global) {
      let owner = dist.owner_of_global(*g);
      let pos = g - offsets[owner];
      if owner == rank {
        self_pairs.push((*l as usize, pos as usize));
      } else {
        needs[owner].push(pos);
        need_slots[owner].push(*l as usize);
      }
    }

    // One round of index lists: every rank tells every peer what it reads.
    for to in 0..size {
      if to != rank {
        comm.send_indices(to, needs[to].clone());
      }
    }
    let mut serves = vec![Vec::new(); size];
    for (from, served) in serves.iter_mut().enumerate() {
      if from != rank {
        *served = comm.recv_indices(from);
      }
    }

    let injective_pairs = match dist.injective() {
      Some(plan) => plan
        .local
        .iter()
        .zip(&plan.global)
        .map(|(l, g)| (*l as usize, (g - my_offset) as usize))
        .collect(),
      None => Vec::new(),
    };

    Ok(Self {
      rank,
      size,
      self_pairs,
      needs,
      need_slots,
      serves,
      injective_reverse: dist.injective().is_some(),
      injective_pairs,
    })
  }

  fn check_lengths(
    &self,
    global_len: usize,
    local_len: usize,
    dist: &StagDistribution,
  ) -> Result<()> {
    if global_len != dist.entries() as usize || local_len != dist.entries_ghost() as usize {
      return Err(StagError::ArgOutOfRange(format!(
        "vector lengths {} / {} do not match the distribution ({} / {})",
        global_len,
        local_len,
        dist.entries(),
        dist.entries_ghost()
      )));
    }
    Ok(())
  }

  /// Forward scatter from owned values read through `read`.
  fn forward_from(
    &self,
    comm: &dyn Communicator,
    read: impl Fn(usize) -> f64,
    local: &mut LocalVector,
  ) {
    for to in 0..self.size {
      if to != self.rank && !self.serves[to].is_empty() {
        let payload = self.serves[to].iter().map(|pos| read(*pos as usize)).collect();
        comm.send_values(to, payload);
      }
    }
    for (l, pos) in &self.self_pairs {
      local.values[*l] = read(*pos);
    }
    for from in 0..self.size {
      if from != self.rank && !self.needs[from].is_empty() {
        let payload = comm.recv_values(from);
        debug_assert_eq!(payload.len(), self.need_slots[from].len());
        for (slot, v) in self.need_slots[from].iter().zip(payload) {
          local.values[*slot] = v;
        }
      }
    }
  }

  /// Global to local: fill the ghosted vector, dummies untouched.
  pub fn forward(
    &self,
    dist: &StagDistribution,
    comm: &dyn Communicator,
    global: &GlobalVector,
    local: &mut LocalVector,
  ) -> Result<()> {
    self.check_lengths(global.values.len(), local.values.len(), dist)?;
    self.forward_from(comm, |pos| global.values[pos], local);
    Ok(())
  }

  /// Local to local: refresh ghost regions from owned data already held in
  /// a local vector.
  pub fn local_to_local(
    &self,
    dist: &StagDistribution,
    comm: &dyn Communicator,
    src: &LocalVector,
    dst: &mut LocalVector,
  ) -> Result<()> {
    let ghost_len = dist.entries_ghost() as usize;
    if src.values.len() != ghost_len || dst.values.len() != ghost_len {
      return Err(StagError::ArgOutOfRange(format!(
        "local vector lengths {} / {} do not match the distribution ({})",
        src.values.len(),
        dst.values.len(),
        ghost_len
      )));
    }
    let remap = dist.local_remap();
    self.forward_from(comm, |pos| src.values[remap[pos] as usize], dst);
    Ok(())
  }

  /// Local to global. Runs through the injective owned plan when a
  /// periodic axis has a single rank; otherwise every held copy travels
  /// back to its owner, and all copies of a dof must agree.
  pub fn reverse(
    &self,
    dist: &StagDistribution,
    comm: &dyn Communicator,
    local: &LocalVector,
    global: &mut GlobalVector,
  ) -> Result<()> {
    self.check_lengths(global.values.len(), local.values.len(), dist)?;
    if self.injective_reverse {
      // Owned data is fully covered by this rank's own box.
      for (l, pos) in &self.injective_pairs {
        global.values[*pos] = local.values[*l];
      }
      return Ok(());
    }
    for to in 0..self.size {
      if to != self.rank && !self.needs[to].is_empty() {
        let payload = self.need_slots[to].iter().map(|l| local.values[*l]).collect();
        comm.send_values(to, payload);
      }
    }
    for (l, pos) in &self.self_pairs {
      global.values[*pos] = local.values[*l];
    }
    for from in 0..self.size {
      if from != self.rank && !self.serves[from].is_empty() {
        let payload = comm.recv_values(from);
        debug_assert_eq!(payload.len(), self.serves[from].len());
        for (pos, v) in self.serves[from].iter().zip(payload) {
          global.values[*pos as usize] = v;
        }
      }
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;
