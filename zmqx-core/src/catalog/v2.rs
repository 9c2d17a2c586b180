//! 2.x option table.

use super::{Access::*, IntWidth::*, OptionDescriptor as D, OptionName::*};

pub(super) static OPTIONS: &[D] = &[
    D::int(Hwm, 1, U64, ReadWrite),
    D::int(Swap, 3, I64, ReadWrite),
    D::int(Affinity, 4, U64, ReadWrite),
    D::bytes(Identity, 5, ReadWrite),
    D::bytes(Subscribe, 6, WriteOnly),
    D::bytes(Unsubscribe, 7, WriteOnly),
    D::int(Rate, 8, I64, ReadWrite),
    D::int(RecoveryIvl, 9, I64, ReadWrite),
    D::int(McastLoop, 10, I64, ReadWrite),
    D::int(SndBuf, 11, U64, ReadWrite),
    D::int(RcvBuf, 12, U64, ReadWrite),
    D::int(RcvMore, 13, I64, ReadOnly),
    D::int(Events, 15, U32, ReadOnly),
    D::int(Type, 16, I32, ReadOnly),
    D::int(Linger, 17, I32, ReadWrite),
    D::int(ReconnectIvl, 18, I32, ReadWrite),
    D::int(Backlog, 19, I32, ReadWrite),
    D::int(RecoveryIvlMsec, 20, I64, ReadWrite),
    D::int(ReconnectIvlMax, 21, I32, ReadWrite),
    D::int(RcvTimeo, 27, I32, ReadWrite),
    D::int(SndTimeo, 28, I32, ReadWrite),
];
