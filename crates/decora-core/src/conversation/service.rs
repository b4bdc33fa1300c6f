//! Multi-turn conversation service over the multimodal backend.

use tracing::debug;

use decora_types::conversation::{ConversationTurn, TurnPart};
use decora_types::error::{GenerationError, RelayError};

use crate::generation::MultimodalGenerator;
use crate::relay::image_ops;

use super::registry::SessionRegistry;

/// Reply from the multimodal backend after part routing.
///
/// If any reply part is an image, the image wins (first one found,
/// PNG-encoded) and accompanying text is dropped; otherwise the text parts
/// are collected in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationReply {
    Image(Vec<u8>),
    Text(Vec<String>),
}

/// Drives multi-turn and one-shot multimodal generation.
///
/// Generic over the generator and the session registry so tests can inject
/// fakes for both.
pub struct ConversationService<M: MultimodalGenerator, R: SessionRegistry> {
    generator: M,
    registry: R,
}

impl<M: MultimodalGenerator, R: SessionRegistry> ConversationService<M, R> {
    pub fn new(generator: M, registry: R) -> Self {
        Self {
            generator,
            registry,
        }
    }

    /// Send the next message in a session, with an optional attached image.
    ///
    /// The session's full history plus the new user turn is replayed to the
    /// backend. On success both the user turn and the model turn are
    /// recorded, so the next call sees them.
    pub async fn send(
        &self,
        chat_id: &str,
        message: &str,
        attachment: Option<(String, Vec<u8>)>,
    ) -> Result<ConversationReply, RelayError> {
        let mut parts = vec![TurnPart::Text(message.to_string())];
        if let Some((mime_type, data)) = attachment {
            parts.push(TurnPart::Image { mime_type, data });
        }
        let user_turn = ConversationTurn::user(parts);

        let mut history = self.registry.history(chat_id).await?;
        debug!(chat_id, turns = history.len(), "replaying session history");
        history.push(user_turn.clone());

        let reply_parts = self.generator.generate_turn(&history).await?;
        if reply_parts.is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }

        self.registry
            .record_exchange(chat_id, user_turn, ConversationTurn::model(reply_parts.clone()))
            .await?;

        Ok(route_parts(reply_parts)?)
    }

    /// One-shot image edit: a single user turn carrying the prompt and the
    /// inline image, with no session involved.
    pub async fn edit_image(
        &self,
        prompt: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<ConversationReply, RelayError> {
        let turn = ConversationTurn::user(vec![
            TurnPart::Text(prompt.to_string()),
            TurnPart::Image {
                mime_type: mime_type.to_string(),
                data,
            },
        ]);

        let reply_parts = self.generator.generate_turn(&[turn]).await?;
        if reply_parts.is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }

        Ok(route_parts(reply_parts)?)
    }
}

/// Apply the routing rule to a non-empty part list.
fn route_parts(parts: Vec<TurnPart>) -> Result<ConversationReply, GenerationError> {
    for part in &parts {
        if let TurnPart::Image { data, .. } = part {
            return Ok(ConversationReply::Image(image_ops::ensure_png(
                data.clone(),
            )?));
        }
    }

    let texts = parts
        .into_iter()
        .filter_map(|part| match part {
            TurnPart::Text(text) => Some(text),
            TurnPart::Image { .. } => None,
        })
        .collect();
    Ok(ConversationReply::Text(texts))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    use decora_types::conversation::TurnRole;
    use decora_types::error::StoreError;

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([1, 2, 3]),
        ));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Backend returning a canned part list, capturing the history it saw.
    struct FakeGenerator {
        reply: Vec<TurnPart>,
        seen: Mutex<Vec<Vec<ConversationTurn>>>,
    }

    impl FakeGenerator {
        fn new(reply: Vec<TurnPart>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl MultimodalGenerator for FakeGenerator {
        async fn generate_turn(
            &self,
            history: &[ConversationTurn],
        ) -> Result<Vec<TurnPart>, GenerationError> {
            self.seen.lock().unwrap().push(history.to_vec());
            Ok(self.reply.clone())
        }
    }

    #[derive(Default)]
    struct MapRegistry {
        map: Mutex<HashMap<String, Vec<ConversationTurn>>>,
    }

    impl SessionRegistry for MapRegistry {
        async fn history(&self, chat_id: &str) -> Result<Vec<ConversationTurn>, StoreError> {
            Ok(self
                .map
                .lock()
                .unwrap()
                .get(chat_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn record_exchange(
            &self,
            chat_id: &str,
            user: ConversationTurn,
            model: ConversationTurn,
        ) -> Result<(), StoreError> {
            let mut map = self.map.lock().unwrap();
            let turns = map.entry(chat_id.to_string()).or_default();
            turns.push(user);
            turns.push(model);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_image_part_wins_over_text_parts() {
        let generator = FakeGenerator::new(vec![
            TurnPart::Text("here is your room".to_string()),
            TurnPart::Image {
                mime_type: "image/png".to_string(),
                data: tiny_png(),
            },
            TurnPart::Text("with a brighter palette".to_string()),
        ]);
        let service = ConversationService::new(generator, MapRegistry::default());

        let reply = service.send("room-1", "brighten it", None).await.unwrap();
        match reply {
            ConversationReply::Image(png) => {
                assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
            }
            other => panic!("expected image reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_text_parts_collected_in_order() {
        let generator = FakeGenerator::new(vec![
            TurnPart::Text("first".to_string()),
            TurnPart::Text("second".to_string()),
        ]);
        let service = ConversationService::new(generator, MapRegistry::default());

        let reply = service.send("room-1", "ideas?", None).await.unwrap();
        assert_eq!(
            reply,
            ConversationReply::Text(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[tokio::test]
    async fn test_zero_parts_is_backend_error() {
        let generator = FakeGenerator::new(vec![]);
        let service = ConversationService::new(generator, MapRegistry::default());

        let err = service.send("room-1", "hello", None).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::Generation(GenerationError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_history_is_replayed_and_extended() {
        let generator = FakeGenerator::new(vec![TurnPart::Text("noted".to_string())]);
        let service = ConversationService::new(generator, MapRegistry::default());

        service.send("room-1", "first message", None).await.unwrap();
        service.send("room-1", "second message", None).await.unwrap();

        let seen = service.generator.seen.lock().unwrap();
        // First call: just the new user turn. Second call: the recorded
        // exchange plus the new user turn.
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[1].len(), 3);
        assert_eq!(seen[1][0].role, TurnRole::User);
        assert_eq!(seen[1][1].role, TurnRole::Model);
    }

    #[tokio::test]
    async fn test_attachment_becomes_inline_image_part() {
        let generator = FakeGenerator::new(vec![TurnPart::Text("ok".to_string())]);
        let service = ConversationService::new(generator, MapRegistry::default());

        service
            .send(
                "room-1",
                "use this as reference",
                Some(("image/jpeg".to_string(), vec![0xFF, 0xD8])),
            )
            .await
            .unwrap();

        let seen = service.generator.seen.lock().unwrap();
        let user_turn = &seen[0][0];
        assert_eq!(user_turn.parts.len(), 2);
        assert!(user_turn.parts[1].is_image());
    }

    #[tokio::test]
    async fn test_edit_image_is_sessionless() {
        let generator = FakeGenerator::new(vec![TurnPart::Image {
            mime_type: "image/png".to_string(),
            data: tiny_png(),
        }]);
        let service = ConversationService::new(generator, MapRegistry::default());

        let reply = service
            .edit_image("make it warmer", "image/png", tiny_png())
            .await
            .unwrap();
        assert!(matches!(reply, ConversationReply::Image(_)));
        assert!(service.registry.map.lock().unwrap().is_empty());
    }
}
