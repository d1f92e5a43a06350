//! Built-in content shown when the stored record is missing or incomplete.

use super::model::{ContentRecord, Details, EventInfo, Milestone, MilestoneIcon};

const DEFAULT_HERO_IMAGE: &str = "https://iv1cdn.vnecdn.net/giaitri/images/web/2025/10/23/toan-canh-dam-cuoi-cua-vo-chong-do-thi-ha-1761191294.jpg?w=1200&h=0&q=100&dpr=2&fit=crop&s=moA8LWQ9dLsT6d16c1Vmpg";
const DEFAULT_MUSIC_URL: &str = "https://docs.google.com/uc?id=1l6GJuaTmotc3lQ2Wead6-2MC2oQ65mc-";
const DEFAULT_EVENT_DATE: &str = "30 . 01 . 2026";
const DEFAULT_MAP_LINK: &str = "https://maps.google.com";

/// ## Summary
/// Returns the complete default record for the wedding identified by `slug`.
#[must_use]
pub fn default_content(slug: &str) -> ContentRecord {
    ContentRecord {
        id: None,
        slug: slug.to_string(),
        hero_image: DEFAULT_HERO_IMAGE.to_string(),
        music_url: DEFAULT_MUSIC_URL.to_string(),
        album_urls: Vec::new(),
        qr_groom: String::new(),
        qr_bride: String::new(),
        details: Details {
            groom_name: "Chiến".to_string(),
            bride_name: "Trang".to_string(),
            event_date: DEFAULT_EVENT_DATE.to_string(),
            invitation_text: "Trong sự dịu dàng của những ngày cuối năm, chúng mình hạnh phúc chia sẻ khoảnh khắc khởi đầu hành trình mới. Sự hiện diện của bạn không chỉ là niềm vui mà còn là nhân chứng cho tình yêu bền chặt của chúng mình.".to_string(),
            initials: "T&C".to_string(),
            invitation_quote: "Hạnh phúc là khi được cùng người mình thương, đi qua những ngày bình yên nhất của cuộc đời.".to_string(),
            milestones: default_milestones(),
            vu_quy: EventInfo {
                title: "Lễ Vu Quy".to_string(),
                date: DEFAULT_EVENT_DATE.to_string(),
                time: "08:00 AM".to_string(),
                location: "Tư gia Nhà Gái".to_string(),
                address: "Số 123, Đường Hoa Hồng, TP. Hà Nội".to_string(),
                map_link: DEFAULT_MAP_LINK.to_string(),
            },
            thanh_hon: EventInfo {
                title: "Lễ Thành Hôn".to_string(),
                date: DEFAULT_EVENT_DATE.to_string(),
                time: "11:00 AM".to_string(),
                location: "Trung tâm Hội nghị Diamond".to_string(),
                address: "Số 456, Đường Kim Cương, TP. Hà Nội".to_string(),
                map_link: DEFAULT_MAP_LINK.to_string(),
            },
        },
    }
}

fn default_milestones() -> Vec<Milestone> {
    [
        (
            "10 / 05 / 2021",
            "Lần đầu gặp gỡ",
            "Vào một chiều mưa tại quán cafe nhỏ, định mệnh đã cho chúng mình gặp nhau.",
            "https://images.unsplash.com/photo-1511795409834-ef04bbd61622?auto=format&fit=crop&q=80&w=600",
        ),
        (
            "14 / 02 / 2022",
            "Lời tỏ tình ngọt ngào",
            "Dưới ánh đèn lung linh của thành phố, chúng mình chính thức gọi nhau là 'Người yêu'.",
            "https://images.unsplash.com/photo-1518196775741-201b817f5024?auto=format&fit=crop&q=80&w=600",
        ),
        (
            "20 / 10 / 2023",
            "Màn cầu hôn bất ngờ",
            "Tại bãi biển thơ mộng, một chiếc nhẫn và một câu 'Đồng ý' đã thay đổi cuộc đời chúng mình mãi mãi.",
            "https://images.unsplash.com/photo-1515934751635-c81c6bc9a2d8?auto=format&fit=crop&q=80&w=600",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (date, title, desc, img))| Milestone {
        id: Milestone::legacy_id(index),
        date: date.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
        img: img.to_string(),
        icon: None,
    })
    .collect()
}

/// ## Summary
/// The entry appended when an editor adds a milestone.
#[must_use]
pub fn new_milestone() -> Milestone {
    Milestone {
        id: uuid::Uuid::now_v7(),
        date: String::new(),
        title: "Kỷ niệm mới".to_string(),
        desc: "Mô tả kỷ niệm của bạn...".to_string(),
        img: String::new(),
        icon: Some(MilestoneIcon::Heart),
    }
}
