use consts::{whatsapp, SITE_NAME};

pub fn order_message(item_name: &str) -> String {
    format!("Hello {SITE_NAME}! I'd like to order {item_name}. Is it available this week?")
}

/// `https://wa.me/<phone>?text=<message>`, with the message URL-encoded.
pub fn chat_link(phone: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        whatsapp::BASE_URL,
        phone,
        urlencoding::encode(message)
    )
}

pub fn item_order_link(item_name: &str) -> String {
    chat_link(whatsapp::ORDER_NUMBER, &order_message(item_name))
}

pub fn enquiry_link() -> String {
    chat_link(
        whatsapp::ORDER_NUMBER,
        &format!("Hello {SITE_NAME}! I have a question about your produce."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_link_targets_the_shop_number() {
        let link = item_order_link("Toor Dal");
        assert!(link.starts_with("https://wa.me/919845012345?text="));
    }

    #[test]
    fn message_is_fully_encoded() {
        let link = chat_link("15550001111", "Roots & Rain: 2 kg?");
        assert_eq!(
            link,
            "https://wa.me/15550001111?text=Roots%20%26%20Rain%3A%202%20kg%3F"
        );
    }

    #[test]
    fn order_message_names_the_item() {
        let link = item_order_link("Wild Forest Honey");
        let text = link.split_once("?text=").map(|(_, t)| t).unwrap_or_default();
        let decoded = urlencoding::decode(text).expect("valid utf-8");
        assert!(decoded.contains("order Wild Forest Honey"));
    }
}
