//! 3.x option table, including the peer-control extension.

use super::{Access::*, IntWidth::*, OptionDescriptor as D, OptionName::*, RawShape};

// Peer-control extension header values.
pub const ZMQ_BLOCK_ADDR: i32 = 70;
pub const ZMQ_UNBLOCK_ADDR: i32 = 71;
pub const ZMQ_APUB_APPROVE: i32 = 72;
pub const ZMQ_LAST_PEER_ADDR: i32 = 73;
pub const ZMQ_APUB_REQ: i32 = 74;
pub const ZMQ_LAST_PEER_UNIQ_ID: i32 = 75;
pub const ZMQ_DISCONNECT_PEER_BY_ID: i32 = 76;

pub(super) static OPTIONS: &[D] = &[
    D::int(Affinity, 4, U64, ReadWrite),
    D::bytes(Identity, 5, ReadWrite),
    D::bytes(Subscribe, 6, WriteOnly),
    D::bytes(Unsubscribe, 7, WriteOnly),
    D::int(Rate, 8, I32, ReadWrite),
    D::int(RecoveryIvl, 9, I32, ReadWrite),
    D::int(SndBuf, 11, I32, ReadWrite),
    D::int(RcvBuf, 12, I32, ReadWrite),
    D::int(RcvMore, 13, I32, ReadOnly),
    D::int(Events, 15, I32, ReadOnly),
    D::int(Type, 16, I32, ReadOnly),
    D::int(Linger, 17, I32, ReadWrite),
    D::int(ReconnectIvl, 18, I32, ReadWrite),
    D::int(Backlog, 19, I32, ReadWrite),
    D::int(ReconnectIvlMax, 21, I32, ReadWrite),
    D::int(MaxMsgSize, 22, I64, ReadWrite),
    D::int(SndHwm, 23, I32, ReadWrite),
    D::int(RcvHwm, 24, I32, ReadWrite),
    D::int(MulticastHops, 25, I32, ReadWrite),
    D::int(RcvTimeo, 27, I32, ReadWrite),
    D::int(SndTimeo, 28, I32, ReadWrite),
    D::int(Ipv4Only, 31, I32, ReadWrite),
    D::string(LastEndpoint, 32, ReadOnly),
    D::int(RouterMandatory, 33, I32, WriteOnly),
    D::int(TcpKeepalive, 34, I32, ReadWrite),
    D::int(TcpKeepaliveCnt, 35, I32, ReadWrite),
    D::int(TcpKeepaliveIdle, 36, I32, ReadWrite),
    D::int(TcpKeepaliveIntvl, 37, I32, ReadWrite),
    D::string(TcpAcceptFilter, 38, WriteOnly),
    D::int(DelayAttachOnConnect, 39, I32, ReadWrite),
    D::int(XpubVerbose, 40, I32, WriteOnly),
    // peer-control extension
    D::string(BlockAddr, ZMQ_BLOCK_ADDR, WriteOnly),
    D::string(UnblockAddr, ZMQ_UNBLOCK_ADDR, WriteOnly),
    D::raw(ApubApprove, ZMQ_APUB_APPROVE, RawShape::CStrSizeOverride),
    D::string(LastPeerAddr, ZMQ_LAST_PEER_ADDR, ReadOnly),
    D::int(ApubReq, ZMQ_APUB_REQ, I32, ReadOnly),
    D::int(LastPeerUniqId, ZMQ_LAST_PEER_UNIQ_ID, U32, ReadOnly),
    D::raw(DisconnectPeerById, ZMQ_DISCONNECT_PEER_BY_ID, RawShape::SizeOnly),
];
