// The league computation engine.
//
// Four pure, synchronous components over immutable input snapshots: the
// standings calculator (Campionato and Battle Royale), the head-to-head
// analyzer, the schedina predictions scorer, and the team performance
// aggregator. No internal state, no I/O; callers re-run whichever function
// they need whenever an input collection changes.

pub mod head_to_head;
pub mod model;
pub mod predictions;
pub mod profile;
pub mod standings;
