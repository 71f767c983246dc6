//! Built-in demo trainer catalog.

use super::types::{Coordinates, Review, Specialty, Trainer};

/// Demo trainers shown before any real data exists.
pub fn demo_trainers() -> Vec<Trainer> {
    vec![
        Trainer {
            id: 1,
            name: "Maya Peretz".to_string(),
            email: "maya.peretz@fasta.fit".to_string(),
            photo_url: "https://picsum.photos/seed/maya/200/200".to_string(),
            reviews: vec![
                Review {
                    id: 1,
                    author: "@danal".to_string(),
                    rating: 5.0,
                    comment: "Patient and incredibly knowledgeable.".to_string(),
                },
                Review {
                    id: 2,
                    author: "@ron_k".to_string(),
                    rating: 4.0,
                    comment: "Great flow sessions, highly recommended.".to_string(),
                },
            ],
            specialties: vec![Specialty::Yoga, Specialty::Pilates],
            hourly_rate: 140,
            location: "Tel Aviv".to_string(),
            is_online: true,
            bio: "Certified yoga and pilates instructor helping clients build \
                  strength and calm for over a decade."
                .to_string(),
            coordinates: Some(Coordinates {
                lat: 32.0853,
                lng: 34.7818,
            }),
        },
        Trainer {
            id: 2,
            name: "Omer Dahan".to_string(),
            email: "omer.dahan@fasta.fit".to_string(),
            photo_url: "https://picsum.photos/seed/omer/200/200".to_string(),
            reviews: vec![Review {
                id: 3,
                author: "@shiri".to_string(),
                rating: 5.0,
                comment: "Pushed me further than I thought possible.".to_string(),
            }],
            specialties: vec![Specialty::Weightlifting, Specialty::CrossFit],
            hourly_rate: 180,
            location: "Haifa".to_string(),
            is_online: false,
            bio: "Competitive powerlifter turned coach. Strength is a skill."
                .to_string(),
            coordinates: Some(Coordinates {
                lat: 32.7940,
                lng: 34.9896,
            }),
        },
        Trainer {
            id: 3,
            name: "Noa Friedman".to_string(),
            email: "noa.friedman@fasta.fit".to_string(),
            photo_url: "https://picsum.photos/seed/noa/200/200".to_string(),
            reviews: Vec::new(),
            specialties: vec![Specialty::Running, Specialty::Cardio, Specialty::Nutrition],
            hourly_rate: 110,
            location: "Jerusalem".to_string(),
            is_online: true,
            bio: "Marathon runner and sports nutritionist. Training plans that \
                  fit real life."
                .to_string(),
            coordinates: Some(Coordinates {
                lat: 31.7683,
                lng: 35.2137,
            }),
        },
        Trainer {
            id: 4,
            name: "Avi Mizrahi".to_string(),
            email: "avi.mizrahi@fasta.fit".to_string(),
            photo_url: "https://picsum.photos/seed/avi/200/200".to_string(),
            reviews: vec![Review {
                id: 4,
                author: "@tomer".to_string(),
                rating: 4.0,
                comment: "Technical, focused, no nonsense.".to_string(),
            }],
            specialties: vec![Specialty::Boxing],
            hourly_rate: 160,
            location: "Tel Aviv".to_string(),
            is_online: true,
            bio: "Former national-level boxer. Footwork first, everything else \
                  follows."
                .to_string(),
            coordinates: Some(Coordinates {
                lat: 32.0600,
                lng: 34.7700,
            }),
        },
    ]
}
