//! 4.x option table.

use super::{Access::*, IntWidth::*, OptionDescriptor as D, OptionName::*};

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
    D::int(Immediate, 39, I32, ReadWrite),
    D::int(XpubVerbose, 40, I32, WriteOnly),
    D::int(RouterRaw, 41, I32, WriteOnly),
    D::int(Ipv6, 42, I32, ReadWrite),
    D::int(Mechanism, 43, I32, ReadOnly),
    D::int(PlainServer, 44, I32, ReadWrite),
    D::string(PlainUsername, 45, ReadWrite),
    D::string(PlainPassword, 46, ReadWrite),
    D::int(CurveServer, 47, I32, ReadWrite),
    D::int(ProbeRouter, 51, I32, WriteOnly),
    D::int(ReqCorrelate, 52, I32, WriteOnly),
    D::int(ReqRelaxed, 53, I32, WriteOnly),
    D::int(Conflate, 54, I32, WriteOnly),
    D::string(ZapDomain, 55, ReadWrite),
    D::int(RouterHandover, 56, I32, WriteOnly),
    D::int(Tos, 57, I32, ReadWrite),
    D::int(HandshakeIvl, 66, I32, ReadWrite),
];
