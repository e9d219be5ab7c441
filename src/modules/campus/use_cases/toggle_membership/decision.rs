use crate::shared::core::primitives::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Joined,
    Left,
    AlreadyMember,
    RedirectedToSignIn,
    /// A write on the same record is still outstanding. The repeated click is
    /// dropped without a notice; the outstanding write reports its own result.
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Send the write to the store on behalf of `user_id`; apply the result only
    /// while the view is still at `epoch`.
    Dispatch { user_id: UserId, epoch: u64 },
    /// Answer locally without touching the store.
    Skip { outcome: MutationOutcome },
}
