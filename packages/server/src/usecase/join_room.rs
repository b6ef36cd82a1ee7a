//! UseCase: 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - PresenceRegistry への追加と ParticipantJoined のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の追加
//! - エッジケース：重複した名前・空の名前（どちらも受け付ける）

use std::sync::Arc;

use crate::domain::{HubEvent, ParticipantName, PresenceRegistry, SessionNotifier};

/// 参加のユースケース
pub struct JoinRoomUseCase {
    presence: Arc<dyn PresenceRegistry>,
    notifier: Arc<dyn SessionNotifier>,
}

impl JoinRoomUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, notifier: Arc<dyn SessionNotifier>) -> Self {
        Self { presence, notifier }
    }

    /// 参加を実行
    ///
    /// 名前の検証・重複チェックは行わない。
    ///
    /// # Returns
    ///
    /// ParticipantJoined を受け付けたセッション数
    pub async fn execute(&self, name: ParticipantName) -> usize {
        self.presence.add_participant(name.clone()).await;
        self.notifier
            .broadcast(HubEvent::ParticipantJoined(name))
            .await
    }
}
