//! 検索結果ストア
//!
//! セッション中に1つだけ作り、検索フローと結果表示に参照を渡す。
//! 購読した時点で最新の結果セットが即座に届く（最新値のリプレイ）。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::types::{ResultSet, SearchResult};

type Observer = dyn Fn(&[SearchResult]);

/// 購読解除用のトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    latest: Rc<[SearchResult]>,
    observers: Vec<(SubscriptionId, Rc<Observer>)>,
    next_id: u64,
    /// 通知ループの実行中
    publishing: bool,
    /// 通知中に新しい結果が届いた
    superseded: bool,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            latest: Rc::from(Vec::new()),
            observers: Vec::new(),
            next_id: 0,
            publishing: false,
            superseded: false,
        }
    }
}

/// 直近の検索結果を保持し、購読者へ配信する
///
/// `clone` は同じストアを指すハンドルを返す。
#[derive(Clone, Default)]
pub struct ResultStore {
    inner: Rc<RefCell<Inner>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 結果セットを丸ごと置き換え、購読順に同期的に通知する
    ///
    /// 通知中の observer から呼ばれた場合は置き換えだけ行い、配信は外側の
    /// ループが最新の結果で最初からやり直す。2つの配信が交互になることはない。
    pub fn set_results(&self, results: ResultSet) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Rc::from(results);
            if inner.publishing {
                inner.superseded = true;
                return;
            }
            inner.publishing = true;
        }

        'publish: loop {
            let (latest, observers) = {
                let mut inner = self.inner.borrow_mut();
                inner.superseded = false;
                let observers: Vec<Rc<Observer>> =
                    inner.observers.iter().map(|(_, o)| Rc::clone(o)).collect();
                (Rc::clone(&inner.latest), observers)
            };

            debug!(
                "publishing {} result(s) to {} subscriber(s)",
                latest.len(),
                observers.len()
            );
            for observer in observers {
                observer(&latest);
                if self.inner.borrow().superseded {
                    continue 'publish;
                }
            }
            break;
        }

        self.inner.borrow_mut().publishing = false;
    }

    pub fn clear_results(&self) {
        self.set_results(Vec::new());
    }

    /// 購読する。observer には現在の結果セットが直ちに渡される
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[SearchResult]) + 'static,
    {
        let observer: Rc<Observer> = Rc::new(observer);
        let (id, latest) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = SubscriptionId(inner.next_id);
            inner.observers.push((id, Rc::clone(&observer)));
            (id, Rc::clone(&inner.latest))
        };
        observer(&latest);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(sid, _)| *sid != id);
        inner.observers.len() != before
    }

    pub fn latest(&self) -> Vec<SearchResult> {
        self.inner.borrow().latest.to_vec()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

impl fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ResultStore")
            .field("latest", &inner.latest.len())
            .field("subscribers", &inner.observers.len())
            .finish()
    }
}
