//! Baked-in bootstrap content. These values seed a fresh deployment and
//! back-fill documents persisted before a field existed.

use super::model::{Achievement, Course, Gender, SiteConfig, SiteDocument, Teacher};

pub fn default_config() -> SiteConfig {
    SiteConfig {
        hero_video_url: "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=1&loop=1"
            .to_string(),
        hero_title: "Ánh Dương Language Center".to_string(),
        hero_subtitle: "Khơi nguồn đam mê - Chắp cánh tương lai".to_string(),
        about_text: "Trung tâm ngoại ngữ Ánh Dương là đơn vị giáo dục với đội ngũ giáo viên tận tâm và giáo trình chuẩn quốc tế.".to_string(),
        mission: "Mang đến môi trường học tập tiếng Anh hiện đại, giúp học viên tự tin hội nhập quốc tế.".to_string(),
        vision: "Trở thành hệ thống trung tâm ngoại ngữ uy tín trong khu vực.".to_string(),
        about_title: None,
        address: "12 Nguyễn Trãi, Phường 1, Tây Ninh, Việt Nam".to_string(),
        phone: "0900000000".to_string(),
        zalo: "0900000000".to_string(),
        email: "info@anhduong.edu.vn".to_string(),
        google_maps_embed: "https://www.google.com/maps/embed".to_string(),
        seo_title: "Trung Tâm Ngoại Ngữ Ánh Dương".to_string(),
        seo_description: "Khóa học IELTS, giao tiếp, tiếng Anh trẻ em.".to_string(),
        seo_keywords: "tiếng anh, ngoại ngữ, ielts".to_string(),
        establishment_decision: "1030/QĐ-SGDĐT".to_string(),
        business_license: "MSDN: 0000000000".to_string(),
        representative: "NGUYỄN THỊ A".to_string(),
        founding_date: "10/01/2023".to_string(),
        brand_name_principal: "ÁNH DƯƠNG".to_string(),
        brand_name_sub: "LANGUAGE CENTER".to_string(),
        brand_short_name: String::new(),
        ..Default::default()
    }
}

pub fn default_courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            title: "Tiếng Anh Trẻ Em".to_string(),
            description: "Học thông qua trò chơi và hoạt động sáng tạo.".to_string(),
            image: "https://picsum.photos/seed/kids/400/300".to_string(),
            price: "2.500.000 VNĐ".to_string(),
            duration: "3 tháng".to_string(),
            category: "Young Learners".to_string(),
        },
        Course {
            id: "2".to_string(),
            title: "Luyện Thi IELTS".to_string(),
            description: "Cam kết đầu ra 6.5+ với lộ trình cá nhân hóa.".to_string(),
            image: "https://picsum.photos/seed/ielts/400/300".to_string(),
            price: "5.000.000 VNĐ".to_string(),
            duration: "6 tháng".to_string(),
            category: "Luyện Thi IELTS".to_string(),
        },
    ]
}

pub fn default_teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: "1".to_string(),
            name: "Mr. Đạt".to_string(),
            role: "Giảng viên IELTS".to_string(),
            bio: "Kinh nghiệm 15 năm, vui vẻ, hài hước".to_string(),
            gender: Gender::Male,
            zalo: Some(String::new()),
            ..Default::default()
        },
        Teacher {
            id: "2".to_string(),
            name: "Ms. Trang".to_string(),
            role: "Giảng viên B1".to_string(),
            bio: "Nhiệt tình, tận tuỵ, ân cần với học viên".to_string(),
            gender: Gender::Female,
            zalo: Some(String::new()),
            ..Default::default()
        },
    ]
}

pub fn default_achievements() -> Vec<Achievement> {
    vec![Achievement {
        id: "1".to_string(),
        year: "2023".to_string(),
        title: "Trung Tâm Xuất Sắc".to_string(),
        description: "Nhận bằng khen từ Sở Giáo dục Đào tạo.".to_string(),
        order: None,
    }]
}

pub fn default_categories() -> Vec<String> {
    vec![
        "Tiếng Anh Giao Tiếp".to_string(),
        "Luyện Thi IELTS".to_string(),
        "Tiếng Anh Trẻ Em".to_string(),
        "Tiếng Anh Doanh Nghiệp".to_string(),
        "Young Learners".to_string(),
    ]
}

/// The document a fresh deployment boots from when neither the store nor
/// the local cache has anything.
pub fn bootstrap_document() -> SiteDocument {
    SiteDocument {
        config: default_config(),
        courses: default_courses(),
        teachers: default_teachers(),
        achievements: default_achievements(),
        categories: default_categories(),
        ..Default::default()
    }
}
