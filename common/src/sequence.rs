//! リクエスト世代管理
//!
//! フローごとに単調増加の番号を振り、最新以外の応答は捨てる。

/// 発行済みリクエストの番号。複製できないので完了処理は1回だけ
#[derive(Debug, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestCounter {
    latest: u64,
    pending: bool,
}

impl RequestCounter {
    pub fn issue(&mut self) -> RequestSeq {
        self.latest += 1;
        self.pending = true;
        RequestSeq(self.latest)
    }

    pub fn is_latest(&self, seq: &RequestSeq) -> bool {
        seq.0 == self.latest
    }

    /// 応答を受け取る。最新なら待ち状態を解いて true
    pub fn settle(&mut self, seq: &RequestSeq) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.pending = false;
        true
    }

    /// 最新のリクエストが応答待ちか
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// 発行済みの番号をすべて古いものにする
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.pending = false;
    }
}

/// 応答を反映したか、古いので捨てたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}
