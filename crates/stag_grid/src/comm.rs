//! Communicator seam.
//!
//! Set-up is SPMD and communication free: every rank derives the full
//! decomposition from shared parameters plus its own rank number, so the
//! engine only ever asks a communicator for `size` and `rank`. The
//! point-to-point methods exist for the scatter appliers, which exchange
//! index lists once at plan construction and value buffers per
//! application.
//!
//! `ThreadComm` wires a whole universe of ranks together with channels so
//! the multi-rank machinery can run inside one process, one thread per
//! rank. An MPI transport would implement the same trait.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::types::GridInt;

/// Minimal communicator surface used by the engine.
pub trait Communicator: Send + Sync {
  /// Number of ranks in the communicator.
  fn size(&self) -> usize;

  /// This rank's number in `[0, size)`.
  fn rank(&self) -> usize;

  /// Send an index list to a peer. Never called with `to == rank()`.
  fn send_indices(&self, to: usize, indices: Vec<GridInt>);

  /// Receive an index list from a peer.
  fn recv_indices(&self, from: usize) -> Vec<GridInt>;

  /// Send a value buffer to a peer.
  fn send_values(&self, to: usize, values: Vec<f64>);

  /// Receive a value buffer from a peer.
  fn recv_values(&self, from: usize) -> Vec<f64>;
}

/// Single-rank communicator. It has no peers, so the point-to-point
/// methods are unreachable by construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqComm;

impl Communicator for SeqComm {
  fn size(&self) -> usize {
    1
  }

  fn rank(&self) -> usize {
    0
  }

  fn send_indices(&self, _to: usize, _indices: Vec<GridInt>) {
    unreachable!("sequential communicator has no peers")
  }

  fn recv_indices(&self, _from: usize) -> Vec<GridInt> {
    unreachable!("sequential communicator has no peers")
  }

  fn send_values(&self, _to: usize, _values: Vec<f64>) {
    unreachable!("sequential communicator has no peers")
  }

  fn recv_values(&self, _from: usize) -> Vec<f64> {
    unreachable!("sequential communicator has no peers")
  }
}

enum Packet {
  Indices(Vec<GridInt>),
  Values(Vec<f64>),
}

/// One rank's endpoint in an in-process universe.
///
/// Each ordered pair of ranks gets a dedicated unbounded channel, so sends
/// never block and message order per peer is preserved.
pub struct ThreadComm {
  rank: usize,
  size: usize,
  /// senders[to] carries messages from this rank to `to`.
  senders: Vec<Sender<Packet>>,
  /// receivers[from] carries messages from `from` to this rank.
  receivers: Vec<Receiver<Packet>>,
}

impl ThreadComm {
  /// Build a fully-wired universe of `size` ranks.
  pub fn universe(size: usize) -> Vec<ThreadComm> {
    assert!(size > 0, "universe needs at least one rank");
    // mesh[from][to]
    let mut tx: Vec<Vec<Option<Sender<Packet>>>> = (0..size)
      .map(|_| (0..size).map(|_| None).collect())
      .collect();
    let mut rx: Vec<Vec<Option<Receiver<Packet>>>> = (0..size)
      .map(|_| (0..size).map(|_| None).collect())
      .collect();
    for from in 0..size {
      for to in 0..size {
        let (s, r) = unbounded();
        tx[from][to] = Some(s);
        rx[to][from] = Some(r);
      }
    }
    let mut comms = Vec::with_capacity(size);
    for rank in 0..size {
      let senders = tx[rank]
        .iter_mut()
        .map(|s| s.take().expect("sender wired once"))
        .collect();
      let receivers = rx[rank]
        .iter_mut()
        .map(|r| r.take().expect("receiver wired once"))
        .collect();
      comms.push(ThreadComm {
        rank,
        size,
        senders,
        receivers,
      });
    }
    comms
  }
}

impl Communicator for ThreadComm {
  fn size(&self) -> usize {
    self.size
  }

  fn rank(&self) -> usize {
    self.rank
  }

  fn send_indices(&self, to: usize, indices: Vec<GridInt>) {
    self.senders[to]
      .send(Packet::Indices(indices))
      .expect("peer endpoint dropped mid-exchange");
  }

  fn recv_indices(&self, from: usize) -> Vec<GridInt> {
    match self.receivers[from].recv() {
      Ok(Packet::Indices(idx)) => idx,
      Ok(Packet::Values(_)) => unreachable!("value packet where an index list was expected"),
      Err(_) => unreachable!("peer endpoint dropped mid-exchange"),
    }
  }

  fn send_values(&self, to: usize, values: Vec<f64>) {
    self.senders[to]
      .send(Packet::Values(values))
      .expect("peer endpoint dropped mid-exchange");
  }

  fn recv_values(&self, from: usize) -> Vec<f64> {
    match self.receivers[from].recv() {
      Ok(Packet::Values(v)) => v,
      Ok(Packet::Indices(_)) => unreachable!("index packet where a value buffer was expected"),
      Err(_) => unreachable!("peer endpoint dropped mid-exchange"),
    }
  }
}

#[cfg(test)]
#[path = "comm_test.rs"]
mod comm_test;
