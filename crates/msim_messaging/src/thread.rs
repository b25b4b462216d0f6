//! A real non-blocking messaging backend over OS threads, built on
//! `std::sync::mpsc` channels rather than an async transport: the emitted
//! runtime's messaging contract is synchronous busy-poll, not async/await.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::MessagingError;
use crate::exec::MsgExec;
use crate::groups::{group_members, rank_group_index, shape_is_satisfiable};
use crate::state::PackedReceive;
use crate::tag::RowKind;

const POLL_SLEEP: Duration = Duration::from_millis(2);
const POLL_BOUND: usize = 20_000;

enum Body {
    Bcast(Vec<f64>),
    Packed(RowKind, Vec<u8>),
}

struct Envelope {
    src: usize,
    body: Body,
}

/// One rank's handle into a [`ThreadMsgExec`] world. Construct a whole
/// world with [`new_world`].
pub struct ThreadMsgExec {
    rank: usize,
    world_size: usize,
    senders: Vec<Sender<Envelope>>,
    inbox: Mutex<Receiver<Envelope>>,
    stash: Mutex<Vec<Envelope>>,
    guard: Mutex<()>,
    /// `(group_index, group_size, group_count)` once `create_groups`
    /// succeeds; `None` while every rank is in the single world group.
    group: Mutex<Option<(usize, usize, usize)>>,
    pending_recvs: Mutex<HashMap<(usize, i32), PackedReceive>>,
}

/// Builds a `world_size`-rank cluster of [`ThreadMsgExec`] handles, one per
/// simulated rank, wired together with in-process channels. Hand each
/// handle to the OS thread simulating that rank.
pub fn new_world(world_size: usize) -> Vec<ThreadMsgExec> {
    assert!(world_size > 0, "a world must have at least one rank");
    let mut senders = Vec::with_capacity(world_size);
    let mut receivers = Vec::with_capacity(world_size);
    for _ in 0..world_size {
        let (tx, rx) = mpsc::channel();
        senders.push(tx);
        receivers.push(rx);
    }
    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, rx)| ThreadMsgExec {
            rank,
            world_size,
            senders: senders.clone(),
            inbox: Mutex::new(rx),
            stash: Mutex::new(Vec::new()),
            guard: Mutex::new(()),
            group: Mutex::new(None),
            pending_recvs: Mutex::new(HashMap::new()),
        })
        .collect()
}

impl ThreadMsgExec {
    fn communicator(&self, group_one: bool) -> Vec<usize> {
        if group_one {
            if let Some((idx, group_size, group_count)) = *self.group.lock().unwrap() {
                return group_members(self.world_size, group_size, group_count, idx);
            }
        }
        (0..self.world_size).collect()
    }

    /// Pulls the next envelope matching `(src, pred)` from the stash, or
    /// from the channel if the stash has none, stashing anything that
    /// doesn't match so later calls still see it.
    fn poll_match(&self, src: usize, mut pred: impl FnMut(&Body) -> bool) -> Option<Envelope> {
        {
            let mut stash = self.stash.lock().unwrap();
            if let Some(pos) = stash
                .iter()
                .position(|e| e.src == src && pred(&e.body))
            {
                return Some(stash.remove(pos));
            }
        }
        let inbox = self.inbox.lock().unwrap();
        loop {
            match inbox.try_recv() {
                Ok(env) if env.src == src && pred(&env.body) => return Some(env),
                Ok(env) => self.stash.lock().unwrap().push(env),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    fn packed_tag_matches(body: &Body, tag: RowKind) -> bool {
        matches!(body, Body::Packed(t, _) if t.tag_value() == tag.tag_value())
    }
}

impl MsgExec for ThreadMsgExec {
    fn world_size(&self) -> usize {
        self.world_size
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn group_rank(&self) -> usize {
        let _g = self.guard.lock().unwrap();
        match *self.group.lock().unwrap() {
            Some((idx, group_size, group_count)) => {
                crate::groups::group_rank_of(self.rank, self.world_size, group_size, group_count, idx)
            }
            None => self.rank,
        }
    }

    fn create_groups(&self, group_size: usize, group_count: usize) {
        let _g = self.guard.lock().unwrap();
        if !shape_is_satisfiable(self.world_size, group_size, group_count) {
            log::warn!(
                "rank {}: createGroups({group_size}, {group_count}) cannot cover {} non-root ranks, staying in one world group",
                self.rank,
                self.world_size.saturating_sub(1)
            );
            *self.group.lock().unwrap() = None;
            return;
        }
        let idx = if self.rank == 0 {
            0
        } else {
            rank_group_index(self.rank, group_size).unwrap_or(0)
        };
        *self.group.lock().unwrap() = Some((idx, group_size, group_count));
    }

    fn bcast(&self, group_one: bool, buffer: &mut Vec<f64>) -> Result<(), MessagingError> {
        let _g = self.guard.lock().unwrap();
        let members = self.communicator(group_one);
        if self.rank == 0 {
            for &dst in members.iter().filter(|&&m| m != 0) {
                self.senders[dst]
                    .send(Envelope {
                        src: 0,
                        body: Body::Bcast(buffer.clone()),
                    })
                    .map_err(|e| MessagingError::new(self.rank, e.to_string()))?;
            }
            return Ok(());
        }
        let expected_len = buffer.len();
        for _ in 0..POLL_BOUND {
            if let Some(env) = self.poll_match(0, |b| matches!(b, Body::Bcast(_))) {
                let Body::Bcast(data) = env.body else { unreachable!() };
                if data.len() != expected_len {
                    return Err(MessagingError::new(
                        self.rank,
                        format!(
                            "bcast size mismatch: receiver declared {expected_len}, root sent {}",
                            data.len()
                        ),
                    ));
                }
                *buffer = data;
                return Ok(());
            }
            std::thread::sleep(POLL_SLEEP);
        }
        Err(MessagingError::new(self.rank, "bcast timed out waiting for root"))
    }

    fn bcast_packed(&self, group_one: bool, tag: RowKind, buffer: &mut Vec<u8>) -> Result<(), MessagingError> {
        let _g = self.guard.lock().unwrap();
        let members = self.communicator(group_one);
        if self.rank == 0 {
            for &dst in members.iter().filter(|&&m| m != 0) {
                self.senders[dst]
                    .send(Envelope {
                        src: 0,
                        body: Body::Packed(tag, buffer.clone()),
                    })
                    .map_err(|e| MessagingError::new(self.rank, e.to_string()))?;
            }
            return Ok(());
        }
        for _ in 0..POLL_BOUND {
            if let Some(env) = self.poll_match(0, |b| Self::packed_tag_matches(b, tag)) {
                let Body::Packed(_, bytes) = env.body else { unreachable!() };
                *buffer = bytes;
                return Ok(());
            }
            std::thread::sleep(POLL_SLEEP);
        }
        Err(MessagingError::new(self.rank, "bcastPacked timed out waiting for root"))
    }

    fn start_send(&self, dst: usize, tag: RowKind, payload: Vec<u8>) {
        let _g = self.guard.lock().unwrap();
        // An unbounded mpsc channel never blocks its sender, so the send
        // completes synchronously; there is nothing for waitSendAll to
        // drain beyond observing this result.
        if let Err(e) = self.senders[dst].send(Envelope {
            src: self.rank,
            body: Body::Packed(tag, payload),
        }) {
            log::error!("rank {}: startSend to {dst} failed: {e}", self.rank);
        }
    }

    fn start_recv(&self, src: usize, tag: RowKind) {
        let _g = self.guard.lock().unwrap();
        self.pending_recvs
            .lock()
            .unwrap()
            .entry((src, tag.tag_value()))
            .or_insert_with(PackedReceive::new);
    }

    fn try_receive(&self, src: usize, tag: RowKind) -> Option<Vec<u8>> {
        let _g = self.guard.lock().unwrap();
        let key = (src, tag.tag_value());
        let polled = {
            let mut pending = self.pending_recvs.lock().unwrap();
            if pending.get(&key).map(|r| r.is_completed()).unwrap_or(false) {
                return pending.get(&key).and_then(|r| r.result()).map(|b| b.to_vec());
            }
            drop(pending);
            self.poll_match(src, |b| Self::packed_tag_matches(b, tag))
        };
        let bytes = polled.map(|env| match env.body {
            Body::Packed(_, b) => b,
            Body::Bcast(_) => unreachable!("bcast envelopes never match a packed tag"),
        });
        let mut pending = self.pending_recvs.lock().unwrap();
        let entry = pending.entry(key).or_insert_with(PackedReceive::new);
        if entry.drive(bytes) {
            entry.result().map(|b| b.to_vec())
        } else {
            None
        }
    }

    fn wait_send_all(&self) {
        // start_send is synchronous in this transport; nothing to drain.
    }

    fn wait_recv_all(&self) {
        let _g = self.guard.lock().unwrap();
        for _ in 0..POLL_BOUND {
            let all_done = {
                let pending = self.pending_recvs.lock().unwrap();
                pending.values().all(|r| r.is_completed())
            };
            if all_done {
                break;
            }
            let keys: Vec<(usize, i32)> = self.pending_recvs.lock().unwrap().keys().copied().collect();
            for (src, tag_value) in keys {
                let polled = self.poll_match(src, |b| matches!(b, Body::Packed(t, _) if t.tag_value() == tag_value));
                let bytes = polled.map(|env| match env.body {
                    Body::Packed(_, b) => b,
                    Body::Bcast(_) => unreachable!(),
                });
                if let Some(entry) = self.pending_recvs.lock().unwrap().get_mut(&(src, tag_value)) {
                    entry.drive(bytes);
                }
            }
            std::thread::sleep(POLL_SLEEP);
        }
        self.pending_recvs.lock().unwrap().clear();
    }
}

impl Drop for ThreadMsgExec {
    fn drop(&mut self) {
        let leaked = self
            .pending_recvs
            .get_mut()
            .map(|m| m.values().filter(|r| !r.is_completed()).count())
            .unwrap_or(0);
        if leaked > 0 {
            log::warn!(
                "rank {}: dropping ThreadMsgExec with {leaked} outstanding receive(s) not drained",
                self.rank
            );
        }
    }
}
